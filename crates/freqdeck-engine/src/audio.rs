//! Pronunciation downloads.
//!
//! Every stored meaning gets three recordings: the word itself, its meaning
//! and its example sentence. Files that already exist are never requested
//! again; their contents are not checked.
//!
//! # Example
//!
//! ```no_run
//! use freqdeck_engine::Engine;
//!
//! # async fn example() -> freqdeck_engine::Result<()> {
//! let engine = Engine::new();
//! let report = engine.audio().fetch().await?;
//! println!("{} downloaded, {} already present", report.downloaded, report.skipped);
//! # Ok(())
//! # }
//! ```

use freqdeck::{AssetKind, Meaning};
use serde::Serialize;
use tracing::info;

use crate::{Engine, Result, exists};

/// Report from an audio run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioReport {
    /// Files downloaded.
    pub downloaded: usize,
    /// Files that already existed.
    pub skipped: usize,
}

/// Audio workflow engine.
#[derive(Debug)]
pub struct AudioEngine<'a> {
    engine: &'a Engine,
}

impl<'a> AudioEngine<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Download missing recordings for every stored meaning.
    pub async fn fetch(&self) -> Result<AudioReport> {
        let store = self.engine.meaning_store()?;
        self.fetch_for(store.meanings()).await
    }

    /// Download missing recordings for the given meanings.
    ///
    /// The first failed download aborts the run.
    pub async fn fetch_for(&self, meanings: &[Meaning]) -> Result<AudioReport> {
        let layout = self.engine.layout();
        tokio::fs::create_dir_all(&layout.audio_dir).await?;

        let mut report = AudioReport::default();
        for (index, meaning) in meanings.iter().enumerate() {
            for kind in AssetKind::AUDIO {
                let path = layout.asset_path(&meaning.word, kind);
                if exists(&path).await {
                    report.skipped += 1;
                    continue;
                }

                let text = meaning.spoken_text(kind).unwrap_or_default();
                let bytes = self
                    .engine
                    .client()
                    .speech()
                    .synthesize(text)
                    .await?
                    .save_to(&path)
                    .await?;

                info!(index, file = %path.display(), bytes, text, "downloaded audio");
                report.downloaded += 1;
            }
        }

        Ok(report)
    }
}
