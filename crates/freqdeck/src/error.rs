//! Error types for the freqdeck clients.
//!
//! # Error Handling
//!
//! The errors you are most likely to see:
//!
//! - [`Error::Http`]: the request never produced a response (DNS, timeout, proxy)
//! - [`Error::Status`]: the service answered with a non-success status
//! - [`Error::Json`]: the service answered, but not in the expected shape
//!
//! # Example
//!
//! ```no_run
//! use freqdeck::{Error, FetchClient};
//!
//! # async fn example() {
//! let client = FetchClient::new();
//!
//! match client.dictionary().lookup("serendipity").await {
//!     Ok(entries) => println!("{} entries", entries.len()),
//!     Err(Error::Status { status: 404, .. }) => eprintln!("unknown word"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// The error type for remote API operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// Covers connection failures, timeouts and proxy errors, i.e. every case
    /// where no status code was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service responded with a non-success status code.
    ///
    /// `body` holds whatever text the service sent along, which is usually
    /// the most useful part of the diagnosis.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, read as text.
        body: String,
    },

    /// JSON serialization/deserialization error.
    ///
    /// For the chat endpoint this usually means the model ignored the
    /// requested output format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The chat completion contained no choices.
    #[error("chat completion returned no choices")]
    EmptyChoices,

    /// The chat endpoint requires a bearer token and none was configured.
    #[error("no API key configured for the chat endpoint")]
    MissingApiKey,

    /// Invalid configuration, such as a malformed endpoint or proxy URL.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing a downloaded body to disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for remote API operations.
pub type Result<T> = std::result::Result<T, Error>;
