//! Action modules for the remote services.
//!
//! Each module provides the operations of one endpoint.

mod chat;
mod dictionary;
mod images;
mod speech;

pub use chat::{ChatActions, MEANINGS_PROMPT, strip_code_fence};
pub use dictionary::DictionaryActions;
pub use images::{ImageActions, ImageReply};
pub use speech::SpeechActions;
