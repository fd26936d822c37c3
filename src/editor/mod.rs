//! High-level editing sessions over the graph model.
//!
//! This module is the crate's front door for hosts: an [`EditorSession`]
//! owns every component of one canvas and funnels all mutation — pointer
//! gestures, node/edge commands, draft submissions, and resolved
//! completions — through one serialized entry point. Render layers read
//! [`EditorSnapshot`]s and subscribe to
//! [`EditorEvent`](crate::events::EditorEvent)s; they never mutate.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use flowcanvas::completion::{
//!     CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
//! };
//! use flowcanvas::editor::{Command, EditorSession};
//! use flowcanvas::types::NodeVariant;
//!
//! struct CannedClient;
//!
//! #[async_trait]
//! impl CompletionClient for CannedClient {
//!     async fn complete(
//!         &self,
//!         _request: CompletionRequest,
//!     ) -> Result<CompletionResponse, CompletionError> {
//!         Ok(CompletionResponse::from_text("Hello from the boundary!"))
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut session = EditorSession::new(Arc::new(CannedClient));
//!
//! let source = session.add_node(NodeVariant::Source);
//! let _processor = session.add_node(NodeVariant::Processor);
//!
//! // Mutate through the typed methods…
//! session.update_draft(source, "hello");
//! // …or drive everything through dispatch:
//! session.dispatch(Command::SubmitDraft { node: source });
//!
//! // No edge yet, so nothing was sent.
//! assert_eq!(session.in_flight(), 0);
//! assert_eq!(session.snapshot().nodes.len(), 2);
//! # });
//! ```

mod command;
mod session;

pub use command::Command;
pub use session::{EditorSession, EditorSnapshot};
