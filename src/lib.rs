//! # flowcanvas: Interactive Node-Graph Editor Core
//!
//! flowcanvas is the engine behind a wire-it-up flow canvas: typed nodes on
//! an infinite pannable/zoomable surface, validated Source→Processor
//! connections, and an asynchronous propagation pipeline that forwards
//! submitted drafts through the graph, calls an external language-completion
//! boundary, and merges the responses back into node state.
//!
//! Rendering, routing, and process bootstrap are deliberately out of scope:
//! hosts feed pointer/keyboard [`Command`](editor::Command)s in and read
//! [`EditorSnapshot`](editor::EditorSnapshot)s and
//! [`EditorEvent`](events::EditorEvent)s out.
//!
//! ## Core Concepts
//!
//! - **Graph store**: the authoritative node/edge model; bipartite and
//!   acyclic by construction, structurally valid on every return path
//! - **Viewport**: the pan/zoom transform between screen and graph space
//! - **Interaction**: one tagged-variant state machine arbitrating drag,
//!   pan, connect, and resize — never two modes at once
//! - **Propagation**: content-deduplicated, at-most-one-in-flight-per-node
//!   completion requests, resolved through a single serialized entry point
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use flowcanvas::completion::{
//!     CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
//! };
//! use flowcanvas::editor::EditorSession;
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
//!         Ok(CompletionResponse::from_text("It's sunny and 75°F!"))
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! use flowcanvas::geometry::Point;
//! use flowcanvas::interaction::PointerButton;
//!
//! let mut session = EditorSession::new(Arc::new(CannedClient));
//!
//! // Place a source and a processor, drag the processor clear of the
//! // spawn area, and wire them up port-to-port.
//! let source = session.add_node(NodeVariant::Source);
//! let processor = session.add_node(NodeVariant::Processor);
//! session.pointer_down(Point::new(300.0, 300.0), PointerButton::Primary);
//! session.pointer_move(Point::new(900.0, 300.0));
//! session.pointer_up(Point::new(900.0, 300.0));
//!
//! let output = session.store().node(source).unwrap().output_port().unwrap();
//! let input = session.store().node(processor).unwrap().input_port().unwrap();
//! session.pointer_down(output, PointerButton::Primary);
//! session.pointer_up(input).expect("connection");
//!
//! // Type into the source and submit.
//! session.update_draft(source, "What's the weather like?");
//! session.submit_draft(source);
//! session.run_until_settled().await;
//!
//! let log = session.store().node(processor).unwrap().messages().unwrap();
//! assert_eq!(log.len(), 2);
//! assert_eq!(log[1].content, "It's sunny and 75°F!");
//! # });
//! ```
//!
//! ## Concurrency
//!
//! All graph mutation is serialized through `&mut EditorSession`. The only
//! suspending operation is the completion call, which runs on a spawned
//! tokio task and re-enters the session over a channel — a resolution is
//! applied between commands, never concurrently with one, and is discarded
//! if its target node was deleted while the request was outstanding.
//!
//! ## Module Guide
//!
//! - [`editor`] - Sessions, commands, and render snapshots
//! - [`graph`] - The node/edge store and its structural invariants
//! - [`interaction`] - The pointer-driven state machine
//! - [`propagation`] - Draft fan-out, dedup, and completion reconciliation
//! - [`completion`] - The external completion boundary
//! - [`viewport`] - Screen↔graph coordinate mapping
//! - [`message`] - Messages, roles, and dedup keys
//! - [`events`] - Change notifications for render layers
//! - [`telemetry`] - Tracing subscriber setup for hosts
//! - [`config`] - Environment-driven configuration

pub mod completion;
pub mod config;
pub mod editor;
pub mod events;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod message;
pub mod propagation;
pub mod telemetry;
pub mod types;
pub mod viewport;
