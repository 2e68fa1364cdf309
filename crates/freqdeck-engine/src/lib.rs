//! Enrichment and deck-building workflows for frequency-ranked vocabulary.
//!
//! This crate builds on the [`freqdeck`] clients. Each workflow reads the
//! lemma list and the local stores, calls at most one remote service per
//! work item, and writes its results back to disk:
//!
//! - [`Engine::meanings()`] - generate meanings and examples in batches
//! - [`Engine::phonetics()`] - look up phonetic transcriptions
//! - [`Engine::audio()`] - download pronunciations for word, meaning and example
//! - [`Engine::images()`] - generate an illustration per example sentence
//! - [`Engine::decks()`] - split the enriched cards into frequency-balanced decks
//!
//! Workflows share nothing but the files, so they can be run one at a time or
//! in sequence, and an interrupted run simply continues where it stopped.
//!
//! # Quick Start
//!
//! ```no_run
//! use freqdeck_engine::{Engine, FetchClient, Layout};
//!
//! # async fn example() -> freqdeck_engine::Result<()> {
//! let client = FetchClient::builder().api_key("sk-or-...").build()?;
//! let engine = Engine::from_client(client).with_layout(Layout::new("input", "output"));
//!
//! let report = engine.meanings().fetch().await?;
//! println!("{} new meanings", report.added);
//!
//! for deck in engine.decks().build()? {
//!     println!("{}", deck);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! All workflow modules are enabled by default:
//!
//! - `meanings` - meaning generation
//! - `phonetics` - phonetic transcriptions
//! - `audio` - pronunciation downloads
//! - `images` - image generation
//! - `decks` - deck partitioning and export

mod error;

pub mod lemma;
pub mod retry;
pub mod storage;
pub mod store;

#[cfg(feature = "audio")]
pub mod audio;

#[cfg(feature = "decks")]
pub mod deck;

#[cfg(feature = "images")]
pub mod images;

#[cfg(feature = "meanings")]
pub mod meanings;

#[cfg(feature = "phonetics")]
pub mod phonetics;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub use error::{Error, Result};
pub use lemma::Lemma;
pub use retry::RetryPolicy;
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use store::{IpaStore, MeaningStore};

// Re-export freqdeck types for convenience
pub use freqdeck::{AssetKind, ClientBuilder, FetchClient, Meaning, Word};

#[cfg(feature = "audio")]
use audio::AudioEngine;

#[cfg(feature = "decks")]
use deck::DeckEngine;

#[cfg(feature = "images")]
use images::ImagesEngine;

#[cfg(feature = "meanings")]
use meanings::MeaningsEngine;

#[cfg(feature = "phonetics")]
use phonetics::PhoneticsEngine;

/// Where the generated files go.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Directory of `lemma.txt`, `meanings.json` and `ipas.json`.
    pub input_dir: PathBuf,
    /// Directory of the deck files.
    pub output_dir: PathBuf,
    /// Directory of the `.mp3` files.
    pub audio_dir: PathBuf,
    /// Directory of the `.jpg` files.
    pub image_dir: PathBuf,
}

impl Layout {
    /// The standard layout: `audio/` and `img/` below the output directory.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            input_dir: input_dir.into(),
            audio_dir: output_dir.join("audio"),
            image_dir: output_dir.join("img"),
            output_dir,
        }
    }

    /// Path of an asset for a word.
    pub fn asset_path(&self, word: &Word, kind: AssetKind) -> PathBuf {
        let dir = match kind {
            AssetKind::Image => &self.image_dir,
            _ => &self.audio_dir,
        };
        dir.join(word.asset(kind))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("input", "output")
    }
}

/// Tuning knobs for the workflows.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Words per chat-completion request.
    pub meanings_batch: usize,
    /// Pause between dictionary requests.
    pub ipa_throttle: Duration,
    /// Concurrent image downloads.
    pub image_workers: usize,
    /// Retry policy for image requests that fail in transport.
    pub image_retry: RetryPolicy,
    /// Fraction of the total frequency a deck may hold.
    pub deck_share: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            meanings_batch: 200,
            ipa_throttle: Duration::from_millis(400),
            image_workers: 10,
            image_retry: RetryPolicy::default(),
            deck_share: 0.3,
        }
    }
}

/// High-level workflow engine.
///
/// The engine owns a [`FetchClient`], the [`Storage`] holding the lemma list
/// and JSON stores, the output [`Layout`] and the [`EngineOptions`].
///
/// # Example
///
/// ```no_run
/// use freqdeck_engine::{Engine, EngineOptions, FetchClient, Layout};
///
/// let engine = Engine::from_client(FetchClient::new())
///     .with_layout(Layout::new("data/input", "data/output"))
///     .with_options(EngineOptions {
///         image_workers: 4,
///         ..Default::default()
///     });
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    client: FetchClient,
    storage: Arc<dyn Storage>,
    custom_storage: bool,
    layout: Layout,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine with the default client and the `input`/`output` layout.
    pub fn new() -> Self {
        Self::from_client(FetchClient::new())
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: FetchClient) -> Self {
        let layout = Layout::default();
        Self {
            client,
            storage: Arc::new(FsStorage::new(&layout.input_dir)),
            custom_storage: false,
            layout,
            options: EngineOptions::default(),
        }
    }

    /// Use a different layout.
    ///
    /// Input files are read from its input directory, unless a storage was set
    /// with [`Engine::with_storage()`], which is kept regardless of call order.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        if !self.custom_storage {
            self.storage = Arc::new(FsStorage::new(&layout.input_dir));
        }
        self.layout = layout;
        self
    }

    /// Read and write the input files through `storage` instead of the input directory.
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self.custom_storage = true;
        self
    }

    /// Use different options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// The storage for the input files.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// The output layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The workflow options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Read and parse the lemma list.
    pub fn lemmas(&self) -> Result<Vec<Lemma>> {
        let bytes = self
            .storage
            .read(lemma::LEMMA_FILE)?
            .ok_or_else(|| Error::MissingInput(lemma::LEMMA_FILE.to_string()))?;
        lemma::parse_lemmas(&String::from_utf8_lossy(&bytes))
    }

    /// Load the meanings store.
    pub fn meaning_store(&self) -> Result<MeaningStore> {
        MeaningStore::load(self.storage())
    }

    /// Load the IPA store.
    pub fn ipa_store(&self) -> Result<IpaStore> {
        IpaStore::load(self.storage())
    }

    /// Access meaning generation.
    #[cfg(feature = "meanings")]
    pub fn meanings(&self) -> MeaningsEngine<'_> {
        MeaningsEngine::new(self)
    }

    /// Access phonetic transcription lookups.
    #[cfg(feature = "phonetics")]
    pub fn phonetics(&self) -> PhoneticsEngine<'_> {
        PhoneticsEngine::new(self)
    }

    /// Access pronunciation downloads.
    #[cfg(feature = "audio")]
    pub fn audio(&self) -> AudioEngine<'_> {
        AudioEngine::new(self)
    }

    /// Access image generation.
    #[cfg(feature = "images")]
    pub fn images(&self) -> ImagesEngine<'_> {
        ImagesEngine::new(self)
    }

    /// Access deck partitioning and export.
    #[cfg(feature = "decks")]
    pub fn decks(&self) -> DeckEngine<'_> {
        DeckEngine::new(self)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `path` exists, treating permission errors as absent.
#[cfg(any(feature = "audio", feature = "images"))]
pub(crate) async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn injected() -> Arc<MemoryStorage> {
        Arc::new(MemoryStorage::new().with_file(lemma::LEMMA_FILE, "1 500 the det\n"))
    }

    #[test]
    fn test_injected_storage_survives_later_layout() {
        let engine = Engine::new()
            .with_storage(injected())
            .with_layout(Layout::new("/nonexistent/input", "/nonexistent/output"));

        assert_eq!(engine.layout().input_dir, PathBuf::from("/nonexistent/input"));
        assert_eq!(engine.lemmas().unwrap().len(), 1);
    }

    #[test]
    fn test_layout_then_storage() {
        let engine = Engine::new()
            .with_layout(Layout::new("/nonexistent/input", "/nonexistent/output"))
            .with_storage(injected());

        assert_eq!(engine.lemmas().unwrap()[0].id(), "the-det");
    }

    #[test]
    fn test_layout_sets_input_directory_storage() {
        let engine = Engine::new().with_layout(Layout::new("/nonexistent/input", "out"));
        assert!(matches!(engine.lemmas(), Err(Error::MissingInput(_))));
    }
}
