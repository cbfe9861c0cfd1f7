//! Advisory diagnostics
//!
//! The compile pass never fails; anything noteworthy (an unknown node kind,
//! an oversized table) is recorded as a [`Message`] in an append-only sink
//! that the caller reads after the export. Messages are purely advisory and
//! never consulted by the core itself.

use std::fmt;

use crate::ast::{DocumentNode, Span};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A single advisory message tied to a node of the document tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Message {
    /// Human-readable message text.
    pub message: String,
    /// Kind name of the node the message refers to.
    pub node: Option<String>,
    /// Source span of that node, when the parser provided one.
    pub span: Option<Span>,
}

impl Message {
    /// Create a new message with no node attached.
    pub fn new(message: impl Into<String>) -> Self {
        Message {
            message: message.into(),
            node: None,
            span: None,
        }
    }

    /// Attach the node the message refers to.
    pub fn with_node(mut self, node: &DocumentNode) -> Self {
        self.node = Some(node.kind_name().to_string());
        self.span = node.span;
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.node, &self.span) {
            (Some(node), Some(span)) => write!(
                f,
                "{} (node: {}, line {}, column {})",
                self.message, node, span.start.line, span.start.column
            ),
            (Some(node), None) => write!(f, "{} (node: {})", self.message, node),
            _ => write!(f, "{}", self.message),
        }
    }
}
