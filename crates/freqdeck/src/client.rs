//! The fetch client and builder.

use std::time::Duration;

use reqwest::{Client, Proxy, Url};

use crate::actions::{ChatActions, DictionaryActions, ImageActions, SpeechActions};
use crate::error::{Error, Result};

/// Default chat-completion endpoint (OpenRouter).
const DEFAULT_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default chat model.
const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";

/// Default text-to-speech endpoint.
const DEFAULT_SPEECH_URL: &str = "http://translate.google.com/translate_tts";

/// Default image-generation endpoint; the prompt is appended as a path segment.
const DEFAULT_IMAGE_URL: &str = "https://image.pollinations.ai/prompt";

/// Default dictionary endpoint; the word is appended as a path segment.
const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Default speech language.
const DEFAULT_LANGUAGE: &str = "en";

/// Generating a batch of 200 meanings can take several minutes.
const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(90);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for every remote service freqdeck talks to.
///
/// Cloning is cheap: the underlying connection pools are shared.
///
/// # Example
///
/// ```no_run
/// use freqdeck::FetchClient;
///
/// # async fn example() -> freqdeck::Result<()> {
/// let client = FetchClient::new();
///
/// let entries = client.dictionary().lookup("hello").await?;
/// println!("{}", freqdeck::best_transcription(&entries));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    image_routes: Vec<Client>,
    chat_url: Url,
    model: String,
    api_key: Option<String>,
    chat_timeout: Duration,
    speech_url: Url,
    language: String,
    timeout: Duration,
    image_url: Url,
    dictionary_url: Url,
}

impl FetchClient {
    /// Create a client with the default public endpoints and no API key.
    ///
    /// Chat requests fail with [`Error::MissingApiKey`] until a key is set
    /// through [`FetchClient::builder()`].
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("default client configuration is valid")
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Access chat-completion operations.
    pub fn chat(&self) -> ChatActions<'_> {
        ChatActions { client: self }
    }

    /// Access text-to-speech operations.
    pub fn speech(&self) -> SpeechActions<'_> {
        SpeechActions { client: self }
    }

    /// Access image-generation operations.
    pub fn images(&self) -> ImageActions<'_> {
        ImageActions { client: self }
    }

    /// Access dictionary operations.
    pub fn dictionary(&self) -> DictionaryActions<'_> {
        DictionaryActions { client: self }
    }

    /// Number of image routes: the direct route plus one per proxy.
    pub fn route_count(&self) -> usize {
        self.image_routes.len()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// The image route for `index`, wrapping around the available routes.
    pub(crate) fn image_route(&self, index: usize) -> &Client {
        &self.image_routes[index % self.image_routes.len()]
    }

    pub(crate) fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn chat_timeout(&self) -> Duration {
        self.chat_timeout
    }

    pub(crate) fn speech_url(&self) -> &Url {
        &self.speech_url
    }

    pub(crate) fn language(&self) -> &str {
        &self.language
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn image_url(&self) -> &Url {
        &self.image_url
    }

    pub(crate) fn dictionary_url(&self) -> &Url {
        &self.dictionary_url
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`FetchClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use freqdeck::FetchClient;
///
/// # fn example() -> freqdeck::Result<()> {
/// let client = FetchClient::builder()
///     .api_key("sk-or-...")
///     .model("deepseek/deepseek-chat")
///     .language("en")
///     .proxy("http://10.0.0.2:3128")
///     .image_timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    chat_url: String,
    model: String,
    api_key: Option<String>,
    chat_timeout: Duration,
    speech_url: String,
    language: String,
    image_url: String,
    image_timeout: Duration,
    proxies: Vec<String>,
    dictionary_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            chat_url: DEFAULT_CHAT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
            speech_url: DEFAULT_SPEECH_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
            proxies: Vec::new(),
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the chat-completion endpoint URL.
    pub fn chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    /// Set the chat model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the bearer token sent to the chat endpoint.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the timeout for a single chat-completion call.
    pub fn chat_timeout(mut self, duration: Duration) -> Self {
        self.chat_timeout = duration;
        self
    }

    /// Set the text-to-speech endpoint URL.
    pub fn speech_url(mut self, url: impl Into<String>) -> Self {
        self.speech_url = url.into();
        self
    }

    /// Set the target language for speech synthesis.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the image-generation endpoint URL.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Set the timeout for image requests.
    pub fn image_timeout(mut self, duration: Duration) -> Self {
        self.image_timeout = duration;
        self
    }

    /// Add a proxy that image requests can be routed through.
    ///
    /// Each proxy becomes an additional image route next to the direct one.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxies.push(url.into());
        self
    }

    /// Replace the configured proxies.
    pub fn proxies<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dictionary endpoint URL.
    pub fn dictionary_url(mut self, url: impl Into<String>) -> Self {
        self.dictionary_url = url.into();
        self
    }

    /// Set the timeout for speech and dictionary requests.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`Error::Config`] if an endpoint or proxy URL does not parse.
    pub fn build(self) -> Result<FetchClient> {
        let http = Client::builder().build()?;

        let mut image_routes = vec![Client::builder().timeout(self.image_timeout).build()?];
        for proxy in &self.proxies {
            let proxy = Proxy::all(proxy.as_str())
                .map_err(|e| Error::Config(format!("invalid proxy '{}': {}", proxy, e)))?;
            image_routes.push(
                Client::builder()
                    .proxy(proxy)
                    .timeout(self.image_timeout)
                    .build()?,
            );
        }

        Ok(FetchClient {
            http,
            image_routes,
            chat_url: parse_url("chat", &self.chat_url)?,
            model: self.model,
            api_key: self.api_key,
            chat_timeout: self.chat_timeout,
            speech_url: parse_url("speech", &self.speech_url)?,
            language: self.language,
            timeout: self.timeout,
            image_url: parse_url("image", &self.image_url)?,
            dictionary_url: parse_url("dictionary", &self.dictionary_url)?,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("invalid {} URL '{}': {}", name, raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "{} URL '{}' cannot carry a path",
            name, raw
        )));
    }
    Ok(url)
}

/// Append `segment` to `base` as a single percent-encoded path segment.
pub(crate) fn with_segment(base: &Url, segment: &str) -> Url {
    let mut url = base.clone();
    // parse_url rejects cannot-be-a-base URLs, so path_segments_mut succeeds.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client_has_direct_route_only() {
        let client = FetchClient::new();
        assert_eq!(client.route_count(), 1);
        assert_eq!(client.language(), "en");
        assert!(client.api_key().is_none());
    }

    #[test]
    fn test_each_proxy_adds_a_route() {
        let client = FetchClient::builder()
            .proxy("http://127.0.0.1:3128")
            .proxy("http://127.0.0.1:3129")
            .build()
            .unwrap();
        assert_eq!(client.route_count(), 3);
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let err = FetchClient::builder()
            .dictionary_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_with_segment_escapes_prompt() {
        let base = Url::parse("https://image.example/prompt").unwrap();
        let url = with_segment(&base, "What's the matter?");
        assert_eq!(
            url.as_str(),
            "https://image.example/prompt/What's%20the%20matter%3F"
        );

        let trailing = Url::parse("https://image.example/prompt/").unwrap();
        let url = with_segment(&trailing, "a/b");
        assert_eq!(url.as_str(), "https://image.example/prompt/a%2Fb");
    }
}
