//! Image-generation actions.

use crate::client::{FetchClient, with_segment};
use crate::error::Result;
use crate::types::Download;

/// Provides access to image-generation operations.
///
/// Obtained via [`FetchClient::images()`].
#[derive(Debug)]
pub struct ImageActions<'a> {
    pub(crate) client: &'a FetchClient,
}

/// Outcome of an image request that reached the service.
#[derive(Debug)]
pub enum ImageReply {
    /// The service produced an image.
    Image(Download),
    /// The service refused the prompt; `body` is its plain-text explanation.
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The drained response body.
        body: String,
    },
}

impl<'a> ImageActions<'a> {
    /// Generate an image for `prompt` through the given route.
    ///
    /// Route `0` is the direct connection; higher routes go through the
    /// configured proxies, wrapping around [`FetchClient::route_count()`].
    ///
    /// Transport failures are returned as errors so the caller can retry;
    /// a non-success status is a [`ImageReply::Rejected`] value.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use freqdeck::{FetchClient, ImageReply};
    /// # async fn example() -> freqdeck::Result<()> {
    /// let client = FetchClient::new();
    /// match client.images().generate("A cat on a mat", 0).await? {
    ///     ImageReply::Image(download) => {
    ///         download.save_to("cat-n.jpg").await?;
    ///     }
    ///     ImageReply::Rejected { status, body } => eprintln!("{}: {}", status, body),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, prompt: &str, route: usize) -> Result<ImageReply> {
        let url = with_segment(self.client.image_url(), prompt);
        let response = self.client.image_route(route).get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(ImageReply::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ImageReply::Image(Download::new(response)))
    }
}
