//! Dictionary lookup actions.

use crate::client::{FetchClient, with_segment};
use crate::error::{Error, Result};
use crate::types::{DictionaryEntry, best_transcription};

/// Provides access to dictionary operations.
///
/// Obtained via [`FetchClient::dictionary()`].
#[derive(Debug)]
pub struct DictionaryActions<'a> {
    pub(crate) client: &'a FetchClient,
}

impl<'a> DictionaryActions<'a> {
    /// Look up all dictionary entries for a word.
    ///
    /// Only the literal text is sent; the service has no notion of part of
    /// speech. An unknown word yields [`Error::Status`] with status 404.
    pub async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>> {
        let url = with_segment(self.client.dictionary_url(), word);
        let response = self
            .client
            .http()
            .get(url)
            .timeout(self.client.timeout())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Look up a word and return its preferred transcription.
    ///
    /// See [`best_transcription`] for how the transcription is chosen.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use freqdeck::FetchClient;
    /// # async fn example() -> freqdeck::Result<()> {
    /// let client = FetchClient::new();
    /// let ipa = client.dictionary().transcription("hello").await?;
    /// println!("hello {}", ipa);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn transcription(&self, word: &str) -> Result<String> {
        let entries = self.lookup(word).await?;
        Ok(best_transcription(&entries))
    }
}
