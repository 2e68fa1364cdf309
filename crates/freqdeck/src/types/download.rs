//! Streaming download handle.

use std::path::{Path, PathBuf};

use reqwest::Response;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// A successful response whose body has not been read yet.
///
/// The body is streamed chunk by chunk, so large media never has to be held
/// in memory.
#[derive(Debug)]
pub struct Download {
    response: Response,
}

impl Download {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }

    /// The HTTP status of the response.
    pub fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    /// The `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Stream the body to `path` and return the number of bytes written.
    ///
    /// The body goes to a `.part` sibling first and is renamed into place once
    /// complete, so `path` only ever exists with a fully downloaded body.
    pub async fn save_to(mut self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let partial = partial_path(path);

        let mut file = fs::File::create(&partial).await?;
        let mut written = 0u64;
        let streamed = async {
            while let Some(chunk) = self.response.chunk().await? {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            Ok::<_, crate::Error>(())
        }
        .await;

        if let Err(e) = streamed {
            drop(file);
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }

        drop(file);
        fs::rename(&partial, path).await?;
        Ok(written)
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> Result<Vec<u8>> {
        Ok(self.response.bytes().await?.to_vec())
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
