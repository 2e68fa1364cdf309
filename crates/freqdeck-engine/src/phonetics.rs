//! Phonetic transcription lookups.
//!
//! Words are looked up one at a time, in lemma order, with a pause between
//! requests. The IPA store is written after every resolved word.
//!
//! The dictionary is queried by word text only, so every part of speech of a
//! word gets the same transcription; within a run the first answer for a word
//! is reused for its other parts of speech without another request.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::lemma::Lemma;
use crate::store::IpaStore;
use crate::{Engine, Result};

/// Report from a phonetics run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhoneticsReport {
    /// Keys that received a transcription (possibly empty).
    pub resolved: usize,
    /// Keys that already had a transcription.
    pub skipped: usize,
    /// Keys whose lookup failed; they are retried on the next run.
    pub failed: usize,
    /// Requests sent to the dictionary.
    pub requests: usize,
}

/// Phonetics workflow engine.
#[derive(Debug)]
pub struct PhoneticsEngine<'a> {
    engine: &'a Engine,
}

impl<'a> PhoneticsEngine<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Look up transcriptions for every lemma that lacks one.
    pub async fn fetch(&self) -> Result<PhoneticsReport> {
        let lemmas = self.engine.lemmas()?;
        self.fetch_for(&lemmas).await
    }

    /// Look up transcriptions for the given lemmas that lack one.
    ///
    /// Failed lookups are logged and counted; only store errors abort the run.
    pub async fn fetch_for(&self, lemmas: &[Lemma]) -> Result<PhoneticsReport> {
        let storage = self.engine.storage();
        let throttle = self.engine.options().ipa_throttle;
        let mut ipas = IpaStore::load(storage)?;
        let mut looked_up: HashMap<&str, Option<String>> = HashMap::new();
        let mut report = PhoneticsReport::default();

        for lemma in lemmas {
            let id = lemma.id();
            if ipas.contains(&id) {
                report.skipped += 1;
                continue;
            }

            let text = lemma.word.text.as_str();
            if !looked_up.contains_key(text) {
                if report.requests > 0 {
                    tokio::time::sleep(throttle).await;
                }
                report.requests += 1;

                let result = match self.engine.client().dictionary().transcription(text).await {
                    Ok(ipa) => Some(ipa),
                    Err(e) => {
                        warn!(word = text, error = %e, "cannot find phonetic");
                        None
                    }
                };
                looked_up.insert(text, result);
            }

            match looked_up.get(text).cloned().flatten() {
                Some(ipa) => {
                    info!(word = text, %id, ipa = %ipa, "found phonetic");
                    ipas.insert(id, ipa);
                    ipas.persist(storage)?;
                    report.resolved += 1;
                }
                None => report.failed += 1,
            }
        }

        Ok(report)
    }
}
