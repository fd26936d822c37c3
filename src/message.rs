//! Message types for processor node logs and the completion boundary.
//!
//! Messages are the payload the propagation engine moves through the graph:
//! a submitted draft becomes a user-role message in every connected
//! processor's log, and the completion boundary answers with assistant-role
//! messages. Each message carries a unique [`MessageId`] and a creation
//! timestamp; deduplication uses the content-derived [`MessageKey`] instead,
//! so the same logical text is never processed twice even when it is
//! re-derived with a fresh id.
//!
//! # Examples
//!
//! ```
//! use flowcanvas::message::{Message, Role};
//!
//! let user_msg = Message::user("What's on the canvas?");
//! let assistant_msg = Message::assistant("Two nodes and one wire.");
//!
//! assert!(user_msg.is_role(Role::User));
//! assert_eq!(user_msg.key(), Message::user("What's on the canvas?").key());
//! assert_ne!(user_msg.id, assistant_msg.id);
//! ```

use chrono::{DateTime, Utc};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::MessageId;

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text a person typed into a source node.
    User,
    /// Text produced by the completion boundary (including synthetic error
    /// notices).
    Assistant,
    /// Instruction text sent to the boundary, never shown in a node log.
    System,
}

impl Role {
    /// The canonical lowercase wire label for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    /// Normalize an external role label. Foreign strings only ever arrive
    /// from the completion boundary, which speaks for the assistant, so
    /// anything unrecognized collapses to [`Role::Assistant`].
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "user" => Role::User,
            "system" => Role::System,
            _ => Role::Assistant,
        }
    }
}

/// A content-derived deduplication key.
///
/// Two messages with the same role and byte-identical content share a key
/// regardless of their ids or timestamps. Keys are transient (the ledger that
/// holds them dies with the session), so an in-process hash is sufficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageKey(u64);

impl MessageKey {
    /// Derive the key for a (role, content) pair.
    #[must_use]
    pub fn of(role: Role, content: &str) -> Self {
        let mut hasher = FxHasher::default();
        role.as_str().hash(&mut hasher);
        content.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// One entry in a processor node's message log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this entry.
    pub id: MessageId,
    /// Who authored the entry.
    pub role: Role,
    /// The text content.
    pub content: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with the given role and content.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Returns true if this message has the given role.
    #[must_use]
    pub fn is_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// The deduplication key for this message's (role, content) pair.
    #[must_use]
    pub fn key(&self) -> MessageKey {
        MessageKey::of(self.role, &self.content)
    }
}
