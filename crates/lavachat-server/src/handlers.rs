//! HTTP Handlers
//!
//! Route handlers are forwarding glue: validate input, call the payments
//! service or the completion proxy, map failures to JSON error responses.
//! Secret material (connection secrets, forward tokens) is resolved and
//! consumed entirely inside this module; nothing secret-shaped appears in
//! any response type.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use lavachat_core::{
    message::Message,
    provider::{CompletionProvider, CompletionStream, GenerationOptions},
};
use lavachat_payments::{Balance, CheckoutSessionRequest, ForwardToken};
use lavachat_runtime::OpenAiProvider;

use crate::json::parse_json_object;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub connection_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    pub connection_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Connection details endpoint
///
/// Projects the payments-service record to its public shape; the
/// connection secret stays server-side.
pub async fn get_connection(
    State(state): State<AppState>,
    Path(connection_id): Path<String>,
) -> Result<Json<ConnectionDetails>, (StatusCode, Json<ErrorResponse>)> {
    if connection_id.trim().is_empty() {
        return Err(bad_request("Connection ID is required"));
    }

    match state.lava.retrieve_connection(&connection_id).await {
        Ok(connection) => {
            let wallet = connection.wallet.unwrap_or_default();
            Ok(Json(ConnectionDetails {
                connection_id: connection.id,
                balance: wallet.balance.as_ref().and_then(Balance::as_f64),
                email: wallet.email,
            }))
        }
        Err(e) if e.is_not_found() => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Connection not found".into(),
            }),
        )),
        Err(e) => {
            tracing::error!("connection lookup failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch connection details".into(),
                }),
            ))
        }
    }
}

/// Bare connections path (no id segment)
pub async fn connection_missing_id() -> (StatusCode, Json<ErrorResponse>) {
    bad_request("Connection ID is required")
}

/// Create an onboarding checkout session
///
/// Takes no body; the mode is pinned server-side.
pub async fn create_checkout_session(
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = CheckoutSessionRequest::onboarding(state.config.origin_url.clone());

    match state.lava.create_checkout_session(&request).await {
        Ok(session) => Ok(Json(TokenResponse {
            token: session.checkout_session_token,
        })),
        Err(e) => {
            tracing::error!("checkout session creation failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create checkout session".into(),
                }),
            ))
        }
    }
}

/// Create a topup checkout session for an existing connection
///
/// The body is untrusted text run through the JSON guard before any field
/// is read.
pub async fn create_topup_session(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<TokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(json) = parse_json_object(&body) else {
        return Err(bad_request("Invalid request body"));
    };

    let connection_id = match json.get("connectionId").and_then(|v| v.as_str()) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(bad_request("Connection ID is required")),
    };

    let request = CheckoutSessionRequest::topup(state.config.origin_url.clone(), connection_id);

    match state.lava.create_checkout_session(&request).await {
        Ok(session) => Ok(Json(TokenResponse {
            token: session.checkout_session_token,
        })),
        Err(e) => {
            tracing::error!("top-up session creation failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create top-up session".into(),
                }),
            ))
        }
    }
}

/// Chat endpoint
///
/// Resolves the connection server-side, derives a forward token, and
/// proxies the conversation to the model API through the payments proxy.
/// Responds with buffered JSON, or SSE when the client asks for
/// `text/event-stream`.
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let provider = match resolve_provider(&state, &payload.connection_id).await {
        Ok(provider) => provider,
        Err(response) => return response,
    };

    let options = GenerationOptions::for_model(state.config.model.as_str());

    if wants_stream(&headers) {
        chat_stream(&provider, &payload.messages, &options).await
    } else {
        chat_sync(&provider, &payload.messages, &options).await
    }
}

/// Look up the connection and build a completion client authorized by a
/// fresh forward token.
async fn resolve_provider(
    state: &AppState,
    connection_id: &str,
) -> Result<OpenAiProvider, Response> {
    let connection = state
        .lava
        .retrieve_connection(connection_id)
        .await
        .map_err(|e| {
            tracing::error!("connection lookup failed: {e}");
            internal_error(e.user_message())
        })?;

    let token =
        ForwardToken::issue(&connection.secret, &state.config.product_secret).map_err(|e| {
            tracing::error!("forward token issuance failed: {e}");
            internal_error(e.user_message())
        })?;

    Ok(OpenAiProvider::new(
        state.lava.completions_url(),
        token.reveal(),
    ))
}

fn wants_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/event-stream"))
}

async fn chat_sync(
    provider: &OpenAiProvider,
    messages: &[Message],
    options: &GenerationOptions,
) -> Response {
    match provider.complete(messages, options).await {
        Ok(completion) => {
            if let Some(usage) = completion.usage {
                tracing::info!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    total_tokens = usage.total_tokens,
                    "chat completed"
                );
            }
            Json(ChatResponse {
                text: completion.content,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!("chat completion failed: {e}");
            internal_error(e.user_message())
        }
    }
}

async fn chat_stream(
    provider: &OpenAiProvider,
    messages: &[Message],
    options: &GenerationOptions,
) -> Response {
    let stream = match provider.complete_stream(messages, options).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!("chat stream start failed: {e}");
            return internal_error(e.user_message());
        }
    };

    // The drain task owns the upstream stream; the response only holds the
    // receiving end. A client abort drops the receiver, not the drain.
    let (tx, rx) = mpsc::channel::<Event>(32);
    tokio::spawn(drain_stream(stream, tx));

    let events = ReceiverStream::new(rx).map(Ok::<_, Infallible>);
    Sse::new(events).keep_alive(KeepAlive::default()).into_response()
}

/// Consume the upstream stream to completion, forwarding chunks while the
/// client is still listening.
///
/// Usage metering upstream settles when the stream is fully consumed, so
/// the drain must not stop on client disconnect.
async fn drain_stream(mut stream: CompletionStream, tx: mpsc::Sender<Event>) {
    let mut client_gone = false;
    let mut usage = None;

    while let Some(result) = stream.next().await {
        match result {
            Ok(chunk) => {
                if chunk.usage.is_some() {
                    usage = chunk.usage;
                }
                if !client_gone {
                    let payload = serde_json::json!({
                        "type": "chunk",
                        "content": chunk.delta,
                        "done": chunk.done,
                    });
                    if tx.send(Event::default().data(payload.to_string())).await.is_err() {
                        client_gone = true;
                        tracing::debug!("client disconnected, draining upstream stream");
                    }
                }
            }
            Err(e) => {
                tracing::error!("stream error: {e}");
                if !client_gone {
                    let payload = serde_json::json!({
                        "type": "error",
                        "error": e.user_message(),
                    });
                    let _ = tx.send(Event::default().data(payload.to_string())).await;
                }
                break;
            }
        }
    }

    // Completion hook: fires whether or not the client stayed connected.
    match usage {
        Some(usage) => tracing::info!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            client_gone,
            "chat stream completed"
        ),
        None => tracing::info!(client_gone, "chat stream completed"),
    }
}
