//! The message propagation engine.
//!
//! Submission walks a source node's outgoing edges and appends the draft as a
//! user message to every connected processor; a reconciliation pass then
//! decides, per processor, whether a completion request must be issued. The
//! pass runs after *every* log mutation — a submission and a resolved
//! completion alike — which is what makes implicit queueing work: a
//! submission that lands while a request is in flight simply waits in the
//! log until the next pass picks it up.
//!
//! # Invariants
//!
//! - At most one completion request is outstanding per processor (the
//!   `pending` flag gates the pass).
//! - A (role, content) pair is processed at most once per processor (the
//!   [`MessageKey`](crate::message::MessageKey) ledger; a failed request
//!   keeps its key, so retrying takes a genuinely new submission).
//! - Requests resolve through a channel owned by the engine and are applied
//!   by the session's single-writer loop, never by the spawned task itself —
//!   resolutions are serialized with interactive mutation and checked against
//!   node existence before they touch the store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::completion::{CompletionClient, CompletionRequest, CompletionResponse, CompletionError};
use crate::graph::{GraphError, GraphStore};
use crate::message::{Message, Role};
use crate::types::{MessageId, NodeId};

/// Text of the synthetic assistant entry appended when the boundary fails.
pub const FAILURE_NOTICE: &str =
    "Something went wrong while generating a response. Please try again with a new message.";

/// A resolved completion, delivered back from a spawned boundary task.
#[derive(Debug)]
pub struct CompletionOutcome {
    pub node: NodeId,
    pub result: Result<CompletionResponse, CompletionError>,
}

/// What a draft submission did.
#[derive(Debug, Default)]
pub struct SubmitReport {
    /// One `(processor, message)` entry per connected target the user
    /// message was appended to.
    pub appended: Vec<(NodeId, MessageId)>,
    /// Processors a completion request was issued for in the same pass.
    pub requested: Vec<NodeId>,
}

impl SubmitReport {
    /// True when the submission changed nothing (empty draft or no wires).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.appended.is_empty()
    }
}

/// What applying one resolved completion did.
#[derive(Debug)]
pub enum AppliedCompletion {
    /// The target node was deleted while the request was outstanding; the
    /// response was dropped without touching the store.
    Discarded { node: NodeId },
    /// The resolution was merged into the node's log.
    Resolved {
        node: NodeId,
        /// False when the entry is a synthetic failure notice.
        ok: bool,
        appended: Vec<MessageId>,
        /// A queued submission immediately triggered a follow-up request.
        followup: bool,
    },
}

/// Drives drafts through the graph and completions back into it.
pub struct PropagationEngine {
    client: Arc<dyn CompletionClient>,
    outcome_tx: flume::Sender<CompletionOutcome>,
    outcome_rx: flume::Receiver<CompletionOutcome>,
    in_flight: usize,
}

impl PropagationEngine {
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        let (outcome_tx, outcome_rx) = flume::unbounded();
        Self {
            client,
            outcome_tx,
            outcome_rx,
            in_flight: 0,
        }
    }

    /// Number of completion requests currently outstanding across all nodes.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Submits a source node's draft.
    ///
    /// A draft that is empty after trimming is a silent no-op, as is a source
    /// with no outgoing edges (the draft is kept so the user can wire up and
    /// resubmit). Otherwise the draft is appended as a user message to every
    /// connected processor, the draft is cleared, and each affected processor
    /// gets a reconciliation pass.
    pub fn submit(
        &mut self,
        store: &mut GraphStore,
        source: NodeId,
    ) -> Result<SubmitReport, GraphError> {
        let node = store
            .node(source)
            .ok_or(GraphError::NodeNotFound { id: source })?;
        let draft = node.draft().ok_or(GraphError::NotASource { id: source })?;
        if draft.trim().is_empty() {
            debug!(%source, "empty draft submission ignored");
            return Ok(SubmitReport::default());
        }

        let targets: Vec<NodeId> = store.edges_from(source).map(|e| e.target()).collect();
        if targets.is_empty() {
            debug!(%source, "submission with no outgoing edges ignored");
            return Ok(SubmitReport::default());
        }

        let content = store.take_draft(source)?;
        let mut report = SubmitReport::default();
        for target in targets {
            let message_id = store.append_message(target, Message::user(content.clone()))?;
            report.appended.push((target, message_id));
        }
        for (target, _) in report.appended.clone() {
            if self.reconcile(store, target)? {
                report.requested.push(target);
            }
        }
        Ok(report)
    }

    /// Runs one reconciliation pass for a processor.
    ///
    /// If no request is outstanding, the log is scanned in order for the
    /// oldest user entry whose key is not yet in the dedup ledger; finding
    /// one issues exactly one boundary request carrying the full ordered log.
    /// Returns whether a request was issued.
    pub fn reconcile(
        &mut self,
        store: &mut GraphStore,
        processor: NodeId,
    ) -> Result<bool, GraphError> {
        let node = store
            .node(processor)
            .ok_or(GraphError::NodeNotFound { id: processor })?;
        let log = node
            .messages()
            .ok_or(GraphError::NotAProcessor { id: processor })?;
        if node.pending() {
            return Ok(false);
        }
        let Some(key) = log
            .iter()
            .filter(|m| m.is_role(Role::User))
            .map(Message::key)
            .find(|k| !node.is_processed(*k))
        else {
            return Ok(false);
        };

        let request = CompletionRequest::from_log(log);
        store.begin_completion(processor, key)?;
        self.in_flight += 1;
        debug!(node = %processor, log_len = request.messages.len(), "completion request issued");

        let client = Arc::clone(&self.client);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client.complete(request).await;
            // A send failure just means the session is gone.
            let _ = outcome_tx.send(CompletionOutcome {
                node: processor,
                result,
            });
        });
        Ok(true)
    }

    /// Applies one resolved completion through the store's entry points.
    ///
    /// Checks node existence first: a resolution for a deleted node is
    /// discarded without mutation or fault. Afterwards the node gets another
    /// reconciliation pass so implicitly queued submissions proceed.
    pub fn apply_outcome(
        &mut self,
        store: &mut GraphStore,
        outcome: CompletionOutcome,
    ) -> AppliedCompletion {
        self.in_flight = self.in_flight.saturating_sub(1);
        let node = outcome.node;
        if !store.contains_node(node) {
            debug!(%node, "completion resolved after node deletion; discarded");
            return AppliedCompletion::Discarded { node };
        }

        let mut appended = Vec::new();
        let ok = match outcome.result {
            Ok(response) => {
                for reply in response.replies {
                    match store.append_message(node, reply) {
                        Ok(id) => appended.push(id),
                        Err(err) => warn!(%node, %err, "dropping completion reply"),
                    }
                }
                true
            }
            Err(err) => {
                warn!(%node, %err, "completion failed; appending notice");
                match store.append_message(node, Message::assistant(FAILURE_NOTICE)) {
                    Ok(id) => appended.push(id),
                    Err(err) => warn!(%node, %err, "dropping failure notice"),
                }
                false
            }
        };
        if let Err(err) = store.finish_completion(node) {
            warn!(%node, %err, "could not clear pending flag");
        }

        let followup = self.reconcile(store, node).unwrap_or(false);
        AppliedCompletion::Resolved {
            node,
            ok,
            appended,
            followup,
        }
    }

    /// Non-blocking: the next resolved outcome, if one is queued.
    #[must_use]
    pub fn try_next_outcome(&self) -> Option<CompletionOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Awaits the next resolved outcome. Returns `None` immediately when no
    /// request is outstanding.
    pub async fn next_outcome(&self) -> Option<CompletionOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        self.outcome_rx.recv_async().await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::types::NodeVariant;
    use async_trait::async_trait;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, CompletionError> {
            let last = request.messages.last().expect("non-empty log");
            Ok(CompletionResponse::from_text(format!("echo: {}", last.content)))
        }
    }

    fn wired_pair(store: &mut GraphStore) -> (NodeId, NodeId) {
        let source = store.add_node(NodeVariant::Source, Point::new(0.0, 0.0));
        let processor = store.add_node(NodeVariant::Processor, Point::new(600.0, 0.0));
        store.add_edge(source, processor).expect("edge");
        (source, processor)
    }

    #[tokio::test]
    async fn test_submit_appends_and_requests_once() {
        let mut store = GraphStore::new();
        let (source, processor) = wired_pair(&mut store);
        let mut engine = PropagationEngine::new(Arc::new(EchoClient));

        store.update_draft(source, "hello").expect("draft");
        let report = engine.submit(&mut store, source).expect("submit");
        assert_eq!(report.appended.len(), 1);
        assert_eq!(report.requested, vec![processor]);
        assert_eq!(engine.in_flight(), 1);
        assert_eq!(store.node(source).expect("node").draft(), Some(""));

        let outcome = engine.next_outcome().await.expect("outcome");
        let applied = engine.apply_outcome(&mut store, outcome);
        assert!(matches!(
            applied,
            AppliedCompletion::Resolved { ok: true, followup: false, .. }
        ));
        assert_eq!(engine.in_flight(), 0);

        let log = store.node(processor).expect("node").messages().expect("log");
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].content, "echo: hello");
    }

    #[tokio::test]
    async fn test_whitespace_submission_is_inert() {
        let mut store = GraphStore::new();
        let (source, processor) = wired_pair(&mut store);
        let mut engine = PropagationEngine::new(Arc::new(EchoClient));

        store.update_draft(source, "   \n\t ").expect("draft");
        let report = engine.submit(&mut store, source).expect("submit");
        assert!(report.is_noop());
        assert_eq!(engine.in_flight(), 0);
        assert!(store
            .node(processor)
            .expect("node")
            .messages()
            .expect("log")
            .is_empty());
        // The draft survives an inert submission.
        assert_eq!(store.node(source).expect("node").draft(), Some("   \n\t "));
    }

    #[tokio::test]
    async fn test_stale_outcome_is_discarded() {
        let mut store = GraphStore::new();
        let (source, processor) = wired_pair(&mut store);
        let mut engine = PropagationEngine::new(Arc::new(EchoClient));

        store.update_draft(source, "hello").expect("draft");
        engine.submit(&mut store, source).expect("submit");

        store.remove_node(processor);
        let outcome = engine.next_outcome().await.expect("outcome");
        let applied = engine.apply_outcome(&mut store, outcome);
        assert!(matches!(applied, AppliedCompletion::Discarded { .. }));
        assert_eq!(store.node_count(), 1);
        assert_eq!(engine.in_flight(), 0);
    }
}
