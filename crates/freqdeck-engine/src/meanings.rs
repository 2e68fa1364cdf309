//! Meaning generation.
//!
//! Words from the lemma list that have no stored meaning are sent to the chat
//! endpoint in batches. After every batch the store is reloaded, merged with
//! the reply and written back, so a failed run keeps everything generated
//! before the failure.
//!
//! # Example
//!
//! ```no_run
//! use freqdeck_engine::Engine;
//!
//! # async fn example() -> freqdeck_engine::Result<()> {
//! let engine = Engine::new();
//!
//! let report = engine.meanings().fetch().await?;
//! println!(
//!     "Requested {} words in {} batches, stored {} meanings",
//!     report.requested, report.batches, report.added
//! );
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use freqdeck::Word;
use serde::Serialize;
use tracing::info;

use crate::lemma::Lemma;
use crate::store::MeaningStore;
use crate::{Engine, Result};

/// Report from a meaning generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeaningsReport {
    /// Words that had no meaning and were sent to the chat endpoint.
    pub requested: usize,
    /// Number of chat-completion requests made.
    pub batches: usize,
    /// Meanings added to the store.
    ///
    /// May differ from `requested`: the model can skip words or answer for
    /// words that were already stored.
    pub added: usize,
}

/// Meaning generation workflow engine.
#[derive(Debug)]
pub struct MeaningsEngine<'a> {
    engine: &'a Engine,
}

impl<'a> MeaningsEngine<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Generate meanings for every word of the lemma list that lacks one.
    pub async fn fetch(&self) -> Result<MeaningsReport> {
        let lemmas = self.engine.lemmas()?;
        self.fetch_for(&lemmas).await
    }

    /// Generate meanings for the given lemmas that lack one.
    ///
    /// Any client error aborts the run; batches completed before it stay stored.
    pub async fn fetch_for(&self, lemmas: &[Lemma]) -> Result<MeaningsReport> {
        let storage = self.engine.storage();
        let words = pending_words(lemmas, &MeaningStore::load(storage)?);

        let mut report = MeaningsReport {
            requested: words.len(),
            ..Default::default()
        };

        let batch_size = self.engine.options().meanings_batch.max(1);
        for (i, batch) in words.chunks(batch_size).enumerate() {
            let start = i * batch_size;
            info!(
                from = start,
                to = start + batch.len(),
                first = %batch[0].id(),
                last = %batch[batch.len() - 1].id(),
                "requesting meanings"
            );

            let meanings = self.engine.client().chat().meanings(batch).await?;
            let received = meanings.len();
            // The file may have changed during the request.
            let mut store = MeaningStore::load(storage)?;
            let added = store.merge(meanings);
            store.persist(storage)?;

            info!(received, added, total = store.len(), "stored meanings");
            report.batches += 1;
            report.added += added;
        }

        Ok(report)
    }
}

/// Words from `lemmas` without a stored meaning, in lemma order, each key once.
pub fn pending_words(lemmas: &[Lemma], store: &MeaningStore) -> Vec<Word> {
    let mut seen = HashSet::new();
    lemmas
        .iter()
        .filter(|lemma| {
            let id = lemma.id();
            !store.contains(&id) && seen.insert(id)
        })
        .map(|lemma| lemma.word.clone())
        .collect()
}
