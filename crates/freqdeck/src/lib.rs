//! Async clients for the remote services freqdeck enriches vocabulary with.
//!
//! A single [`FetchClient`] bundles four endpoints, each exposed as an action
//! group in the same way regardless of which service sits behind it:
//!
//! - [`FetchClient::chat()`] - generate meanings and example sentences
//! - [`FetchClient::speech()`] - download spoken audio for a piece of text
//! - [`FetchClient::images()`] - generate an illustration from a prompt
//! - [`FetchClient::dictionary()`] - look up phonetic transcriptions
//!
//! # Quick Start
//!
//! ```no_run
//! use freqdeck::{FetchClient, Word};
//!
//! # async fn example() -> freqdeck::Result<()> {
//! let client = FetchClient::builder()
//!     .api_key("sk-or-...")
//!     .build()?;
//!
//! let words = vec![Word::new("the", "det"), Word::new("run", "v")];
//! let meanings = client.chat().meanings(&words).await?;
//! for meaning in &meanings {
//!     println!("{}: {}", meaning.id(), meaning.meaning);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The shared vocabulary types ([`Word`], [`Meaning`]) live here as well so
//! that every layer correlates records through the same identity key.

pub mod actions;
pub mod client;
pub mod error;
pub mod types;

pub use actions::{ChatActions, DictionaryActions, ImageActions, ImageReply, SpeechActions};
pub use client::{ClientBuilder, FetchClient};
pub use error::{Error, Result};
pub use types::{
    AssetKind, DictionaryEntry, Download, Meaning, PhoneticText, Word, best_transcription,
    part_of_speech_label,
};
