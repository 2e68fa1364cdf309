//! Type definitions shared by the clients and their callers.

mod dictionary;
mod download;
mod word;

pub use dictionary::{DictionaryEntry, PhoneticText, best_transcription};
pub use download::Download;
pub use word::{AssetKind, Meaning, Word, part_of_speech_label};
