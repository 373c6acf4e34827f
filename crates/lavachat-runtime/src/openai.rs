//! OpenAI-Compatible Completion Client
//!
//! Implementation of `CompletionProvider` against the `/chat/completions`
//! wire format. Streaming responses arrive as SSE `data:` lines terminated
//! by a `[DONE]` sentinel.

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use lavachat_core::{
    error::{ChatError, Result},
    message::{Message, Role},
    provider::{
        Completion, CompletionProvider, CompletionStream, GenerationOptions, StreamChunk,
        TokenUsage,
    },
};

/// OpenAI-compatible chat-completions client
///
/// Constructed per outgoing request in the chat route: the bearer is a
/// fresh forward token, so the client is cheap and holds no session state.
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Create a client for an OpenAI-compatible base URL and bearer key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn wire_messages(messages: &[Message]) -> Vec<WireMessage<'_>> {
        messages
            .iter()
            .map(|m| WireMessage {
                role: m.role,
                content: &m.content,
            })
            .collect()
    }

    async fn send(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
        stream: bool,
    ) -> Result<reqwest::Response> {
        let request = WireRequest {
            model: &options.model,
            messages: Self::wire_messages(messages),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream,
        };

        tracing::debug!(model = %options.model, stream, "completion request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(ChatError::Auth(format!("status {status}: {body}")));
            }
            return Err(ChatError::Provider(format!("status {status}: {body}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let response = self.send(messages, options, false).await?;

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Parse("no choices in response".into()))?;

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            model: wire.model.unwrap_or_else(|| options.model.clone()),
            usage: wire.usage.map(Into::into),
        })
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<CompletionStream> {
        let response = self.send(messages, options, true).await?;
        let mut body = response.bytes_stream();

        let stream = try_stream! {
            let mut buf = String::new();
            let mut finished = false;

            while !finished {
                let Some(chunk) = body.next().await else { break };
                let chunk =
                    chunk.map_err(|e| ChatError::Provider(format!("stream read failed: {e}")))?;
                buf.push_str(&String::from_utf8_lossy(&chunk));

                // SSE frames are newline-delimited `data:` lines
                while let Some(pos) = buf.find('\n') {
                    let line: String = buf.drain(..=pos).collect();
                    let line = line.trim();
                    let Some(data) = line.strip_prefix("data:") else {
                        continue;
                    };

                    match decode_frame(data.trim())? {
                        Frame::Chunk(chunk) => {
                            let done = chunk.done;
                            yield chunk;
                            finished = done;
                        }
                        Frame::Terminator => {
                            if !finished {
                                yield StreamChunk {
                                    delta: String::new(),
                                    done: true,
                                    usage: None,
                                };
                            }
                            finished = true;
                        }
                    }

                    if finished {
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// One decoded SSE payload
enum Frame {
    Chunk(StreamChunk),
    Terminator,
}

/// Decode one SSE `data:` payload.
///
/// `[DONE]` is the protocol terminator and carries no payload; everything
/// else must parse as a completion-chunk object.
fn decode_frame(data: &str) -> Result<Frame> {
    if data == "[DONE]" {
        return Ok(Frame::Terminator);
    }

    let frame: WireStreamFrame =
        serde_json::from_str(data).map_err(|e| ChatError::Parse(format!("bad stream frame: {e}")))?;

    let delta = frame
        .choices
        .first()
        .and_then(|c| c.delta.content.clone())
        .unwrap_or_default();
    let done = frame
        .choices
        .first()
        .is_some_and(|c| c.finish_reason.is_some());

    Ok(Frame::Chunk(StreamChunk {
        delta,
        done,
        usage: frame.usage.map(Into::into),
    }))
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireStreamFrame {
    #[serde(default)]
    choices: Vec<WireStreamChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireStreamChoice {
    #[serde(default)]
    delta: WireDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Default, Deserialize)]
struct WireDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl From<WireUsage> for TokenUsage {
    fn from(wire: WireUsage) -> Self {
        Self {
            prompt_tokens: wire.prompt_tokens,
            completion_tokens: wire.completion_tokens,
            total_tokens: wire.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let messages = vec![Message::system("You are helpful."), Message::user("Hello")];
        let request = WireRequest {
            model: "gpt-4o-mini",
            messages: OpenAiProvider::wire_messages(&messages),
            temperature: 0.7,
            max_tokens: 2048,
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hello");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_decode_delta_frame() {
        let data = r#"{"choices":[{"delta":{"content":"Hel"},"finish_reason":null}]}"#;
        let Frame::Chunk(chunk) = decode_frame(data).unwrap() else {
            panic!("expected chunk");
        };
        assert_eq!(chunk.delta, "Hel");
        assert!(!chunk.done);
    }

    #[test]
    fn test_decode_finish_frame_with_usage() {
        let data = r#"{"choices":[{"delta":{},"finish_reason":"stop"}],
                       "usage":{"prompt_tokens":10,"completion_tokens":5,"total_tokens":15}}"#;
        let Frame::Chunk(chunk) = decode_frame(data).unwrap() else {
            panic!("expected chunk");
        };
        assert!(chunk.done);
        assert_eq!(chunk.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_decode_terminator() {
        assert!(matches!(decode_frame("[DONE]").unwrap(), Frame::Terminator));
    }

    #[test]
    fn test_decode_malformed_frame_is_parse_error() {
        assert!(matches!(
            decode_frame("{not json"),
            Err(ChatError::Parse(_))
        ));
    }

    #[test]
    fn test_response_parse() {
        let json = r#"{
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
            "usage": {"prompt_tokens": 8, "completion_tokens": 3, "total_tokens": 11}
        }"#;
        let wire: WireResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            wire.choices[0].message.content.as_deref(),
            Some("Hi there")
        );
        assert_eq!(wire.usage.unwrap().total_tokens, 11);
    }
}
