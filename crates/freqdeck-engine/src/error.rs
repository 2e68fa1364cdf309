//! Error types for freqdeck-engine.
//!
//! Errors from engine workflows fall into two categories:
//!
//! 1. **Client errors**: Wrapped from the underlying [`freqdeck::Error`] type
//! 2. **Workflow errors**: Problems with the local inputs and stores
//!
//! Workflows that treat per-item failures as recoverable (phonetics, images)
//! report them in their result types instead of returning an error.
//!
//! # Example
//!
//! ```no_run
//! use freqdeck_engine::{Engine, Error};
//!
//! # async fn example() {
//! let engine = Engine::new();
//!
//! match engine.meanings().fetch().await {
//!     Ok(report) => println!("Added {} meanings", report.added),
//!     Err(Error::Lemma { line, reason }) => {
//!         eprintln!("lemma.txt line {}: {}", line, reason);
//!     }
//!     Err(Error::Client(freqdeck::Error::MissingApiKey)) => {
//!         eprintln!("Set OPENROUTER_API_TOKEN");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;

/// Result type for freqdeck-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during engine operations.
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying freqdeck client.
    Client(freqdeck::Error),

    /// An I/O error occurred.
    Io(std::io::Error),

    /// A line of the lemma list could not be parsed.
    Lemma {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A required input file does not exist.
    MissingInput(String),

    /// A JSON store exists but does not contain valid data.
    CorruptStore {
        /// The store file name.
        name: String,
        /// The parse error.
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    Json(serde_json::Error),

    /// A background worker stopped abnormally.
    Worker(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::CorruptStore { source, .. } => Some(source),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Lemma { line, reason } => write!(f, "lemma line {}: {}", line, reason),
            Error::MissingInput(name) => write!(f, "missing input file: {}", name),
            Error::CorruptStore { name, source } => {
                write!(f, "store '{}' is not valid JSON: {}", name, source)
            }
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::Worker(msg) => write!(f, "worker failed: {}", msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<freqdeck::Error> for Error {
    fn from(err: freqdeck::Error) -> Self {
        Error::Client(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
