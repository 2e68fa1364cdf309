//! Chat-completion actions.
//!
//! The chat endpoint is used to generate a definition and an example sentence
//! for each word of a batch in a single request.
//!
//! # Example
//!
//! ```no_run
//! use freqdeck::{FetchClient, Word};
//!
//! # async fn example() -> freqdeck::Result<()> {
//! let client = FetchClient::builder().api_key("sk-or-...").build()?;
//!
//! let meanings = client
//!     .chat()
//!     .meanings(&[Word::new("the", "det")])
//!     .await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::FetchClient;
use crate::error::{Error, Result};
use crate::types::{Meaning, Word};

/// Instructions sent as the system message of every meanings request.
pub const MEANINGS_PROMPT: &str = "You receive words, one per line, in the format \"the det\": \
the word followed by its part of speech. For every word write a short meaning and an example \
sentence that fit that part of speech. Answer with a JSON array of objects with the keys \
\"w\" (word), \"p\" (part of speech, copied from the input), \"m\" (meaning) and \"e\" (example), \
for example [{\"w\": \"the\", \"p\": \"det\", \"m\": \"Denoting one or more people or things \
already mentioned or assumed to be common knowledge\", \"e\": \"What's the matter?\"}]. \
Include every word. Output only the JSON, without any other text.";

/// Provides access to chat-completion operations.
///
/// Obtained via [`FetchClient::chat()`].
#[derive(Debug)]
pub struct ChatActions<'a> {
    pub(crate) client: &'a FetchClient,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

impl<'a> ChatActions<'a> {
    /// Generate meanings for a batch of words.
    ///
    /// The reply is not validated against the request: the model may return
    /// fewer items, extra items, or items in a different order.
    pub async fn meanings(&self, words: &[Word]) -> Result<Vec<Meaning>> {
        let content = self.complete(MEANINGS_PROMPT, &word_list(words)).await?;
        let meanings = serde_json::from_str(strip_code_fence(&content))?;
        Ok(meanings)
    }

    /// Send a system and a user message and return the first choice's content.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self.client.api_key().ok_or(Error::MissingApiKey)?;
        let request = ChatRequest {
            model: self.client.model(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .http()
            .post(self.client.chat_url().clone())
            .bearer_auth(api_key)
            .timeout(self.client.chat_timeout())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "chat completion response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = serde_json::from_str(&body)?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(Error::EmptyChoices)
    }
}

/// One `word pos` pair per line.
fn word_list(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| format!("{} {}\n", w.text, w.part_of_speech))
        .collect()
}

/// Remove a Markdown code fence (and its `json` tag) around a model reply.
pub fn strip_code_fence(content: &str) -> &str {
    let inner = content.trim().trim_matches('`');
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list() {
        let words = vec![Word::new("the", "det"), Word::new("run", "v")];
        assert_eq!(word_list(&words), "the det\nrun v\n");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("[]"), "[]");
        assert_eq!(strip_code_fence("```json\n[{\"w\":\"a\"}]\n```"), "[{\"w\":\"a\"}]");
        assert_eq!(strip_code_fence("```\n[1]\n```\n"), "[1]");
        assert_eq!(strip_code_fence("  json [] "), "[]");
    }
}
