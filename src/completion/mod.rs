//! The external language-completion boundary.
//!
//! This is the sole network-shaped interface in the crate: a request carries
//! one processor node's full ordered message log as `{role, content}` pairs,
//! and the response carries one or more new assistant entries (or a failure).
//! Everything behind the boundary — protocol, auth, the model itself — is an
//! external concern.
//!
//! Implementations plug in through the [`CompletionClient`] trait. The
//! [`HttpCompletionClient`] (behind the `http` feature) speaks the JSON shape
//! of the original hosted service; tests substitute their own clients.
//!
//! Legacy `{sender, text}` message shapes are normalized to the canonical
//! `{role, content}` form here, at the boundary, and never carried further
//! into the crate.

use async_trait::async_trait;
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::message::{Message, Role};

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpCompletionClient;

/// One `{role, content}` pair on the boundary wire.
///
/// Deserialization also accepts the legacy `{sender, text}` shape and
/// normalizes it on the spot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireShape {
    Canonical { role: String, content: String },
    Legacy { sender: String, text: String },
}

impl<'de> Deserialize<'de> for WireMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match WireShape::deserialize(deserializer)? {
            WireShape::Canonical { role, content } => WireMessage { role, content },
            WireShape::Legacy { sender, text } => WireMessage {
                role: Role::from(sender.as_str()).as_str().to_string(),
                content: text,
            },
        })
    }
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// A completion request: one node's full ordered log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<WireMessage>,
}

impl CompletionRequest {
    /// Builds a request from a processor's message log, preserving order.
    #[must_use]
    pub fn from_log(log: &[Message]) -> Self {
        Self {
            messages: log.iter().map(WireMessage::from).collect(),
        }
    }
}

/// A successful completion: one or more new entries for the node's log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionResponse {
    pub replies: Vec<Message>,
}

impl CompletionResponse {
    /// A single-reply response with the given assistant text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            replies: vec![Message::assistant(text)],
        }
    }

    /// Normalizes wire-shaped replies into canonical messages. Unknown role
    /// labels collapse to assistant.
    #[must_use]
    pub fn from_wire(replies: Vec<WireMessage>) -> Self {
        Self {
            replies: replies
                .into_iter()
                .map(|w| Message::new(Role::from(w.role.as_str()), w.content))
                .collect(),
        }
    }
}

/// Why a completion request failed.
///
/// Failures are scoped to the requesting node: the engine turns them into a
/// synthetic assistant notice in that node's log and nothing else.
#[derive(Debug, Error, Diagnostic)]
pub enum CompletionError {
    /// The request never reached the service or the connection dropped.
    #[error("completion transport failure: {message}")]
    #[diagnostic(code(flowcanvas::completion::transport))]
    Transport { message: String },

    /// The service answered with a non-success status.
    #[error("completion service returned status {status}")]
    #[diagnostic(code(flowcanvas::completion::status))]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("malformed completion payload: {message}")]
    #[diagnostic(
        code(flowcanvas::completion::malformed),
        help("The boundary expects a JSON object with assistant text; check the service contract.")
    )]
    Malformed { message: String },
}

/// The boundary itself: turn a message log into new assistant messages.
///
/// Implementations must be cheap to share (`Arc`) — the propagation engine
/// clones the client into a spawned task per request.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}
