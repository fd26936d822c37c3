use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use flowcanvas::completion::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
};
use tokio::sync::Semaphore;

/// Replies `echo: <last message content>` and counts calls.
#[allow(dead_code)]
#[derive(Default)]
pub struct EchoClient {
    calls: AtomicUsize,
}

impl EchoClient {
    #[allow(dead_code)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// The newest user-role entry in a request, which is what an echoing mock
/// should answer.
fn last_user_content(request: &CompletionRequest) -> &str {
    request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.as_str())
        .unwrap_or_default()
}

#[async_trait]
impl CompletionClient for EchoClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CompletionResponse::from_text(format!(
            "echo: {}",
            last_user_content(&request)
        )))
    }
}

/// Always fails with a service error, counting calls.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingClient {
    calls: AtomicUsize,
}

impl FailingClient {
    #[allow(dead_code)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CompletionError::Status { status: 500 })
    }
}

/// Echoes like [`EchoClient`] but holds every response until the test
/// releases it, so in-flight windows can be observed deterministically.
#[allow(dead_code)]
pub struct GatedClient {
    gate: Semaphore,
    calls: AtomicUsize,
}

impl GatedClient {
    #[allow(dead_code)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
        })
    }

    /// Lets `n` held responses through.
    #[allow(dead_code)]
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for GatedClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| CompletionError::Transport {
                message: e.to_string(),
            })?;
        permit.forget();
        Ok(CompletionResponse::from_text(format!(
            "echo: {}",
            last_user_content(&request)
        )))
    }
}
