//! Declarative message-list rendering.
//!
//! UI bindings never build message nodes by hand; they call [`render`]
//! with the current turns and the pending flag and draw whatever comes back.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::turn::{Role, Turn};

/// One entry in the rendered message list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageNode {
    /// A user or bot bubble.
    Message { role: Role, text: String },
    /// The "awaiting reply" placeholder.
    Typing,
}

impl MessageNode {
    /// CSS class for the outer bubble element.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Message { role: Role::User, .. } => "message user",
            Self::Message { role: Role::Bot, .. } | Self::Typing => "message bot",
        }
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        matches!(self, Self::Typing)
    }
}

/// Produce the ordered node list for `turns`, with a trailing typing
/// placeholder when a request is pending.
#[must_use]
pub fn render(turns: &[Turn], pending: bool) -> Vec<MessageNode> {
    let mut nodes: Vec<MessageNode> = turns
        .iter()
        .map(|turn| MessageNode::Message { role: turn.role(), text: turn.text().to_owned() })
        .collect();
    if pending {
        nodes.push(MessageNode::Typing);
    }
    nodes
}
