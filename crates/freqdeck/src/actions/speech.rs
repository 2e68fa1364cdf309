//! Text-to-speech actions.

use crate::client::FetchClient;
use crate::error::{Error, Result};
use crate::types::Download;

/// Provides access to text-to-speech operations.
///
/// Obtained via [`FetchClient::speech()`].
#[derive(Debug)]
pub struct SpeechActions<'a> {
    pub(crate) client: &'a FetchClient,
}

impl<'a> SpeechActions<'a> {
    /// Request spoken audio for `text` in the configured language.
    ///
    /// Returns the unread response; stream it to disk with
    /// [`Download::save_to`]. A non-success status is an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use freqdeck::FetchClient;
    /// # async fn example() -> freqdeck::Result<()> {
    /// let client = FetchClient::new();
    /// let bytes = client
    ///     .speech()
    ///     .synthesize("What's the matter?")
    ///     .await?
    ///     .save_to("the-det-example.mp3")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn synthesize(&self, text: &str) -> Result<Download> {
        let response = self
            .client
            .http()
            .get(self.client.speech_url().clone())
            .query(&[
                ("ie", "UTF-8"),
                ("total", "1"),
                ("idx", "0"),
                ("textlen", "32"),
                ("client", "tw-ob"),
                ("q", text),
                ("tl", self.client.language()),
            ])
            .timeout(self.client.timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Download::new(response))
    }
}
