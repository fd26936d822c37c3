//! HTTP implementation of the completion boundary.
//!
//! Speaks the JSON contract of the hosted completion service: POST the
//! message log (with a leading system prompt), read back `{ "text": … }` as
//! a single assistant reply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EditorConfig;

use super::{CompletionClient, CompletionError, CompletionRequest, CompletionResponse, WireMessage};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Serialize)]
struct RequestBody {
    messages: Vec<WireMessage>,
}

#[derive(Deserialize)]
struct ResponseBody {
    text: String,
}

/// Completion client that posts logs to an HTTP endpoint.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    url: String,
}

impl HttpCompletionClient {
    /// Builds a client from resolved configuration.
    pub fn new(config: &EditorConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(config.completion_timeout)
            .build()
            .map_err(|e| CompletionError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            url: config.completion_url.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        });
        messages.extend(request.messages);

        debug!(url = %self.url, count = messages.len(), "posting completion request");
        let response = self
            .client
            .post(&self.url)
            .json(&RequestBody { messages })
            .send()
            .await
            .map_err(|e| CompletionError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
            });
        }

        let body: ResponseBody =
            response
                .json()
                .await
                .map_err(|e| CompletionError::Malformed {
                    message: e.to_string(),
                })?;
        Ok(CompletionResponse::from_text(body.text))
    }
}
