use serde::{Deserialize, Serialize};

/// Whitespace and comments attached to a node.
///
/// `preserved` marks nodes read by the formatting-preserving parser. Those
/// render verbatim from their stored layout; all other nodes are laid out
/// canonically and their `leading`/`trailing` text is emitted as-is around
/// the canonical rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trivia {
    /// Text emitted before the node.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub leading: String,
    /// Text emitted after the node, including line breaks and comments.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trailing: String,
    /// Comments found in this node's layout, in source order, each with its `#`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub preserved: bool,
}

impl Trivia {
    /// Empty trivia for a node read from source.
    pub fn preserved() -> Self {
        Self {
            preserved: true,
            ..Self::default()
        }
    }

    /// Returns `true` if no text and no comments are attached.
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.comments.is_empty()
    }

    /// Drops the stored layout but keeps attached comments.
    pub fn normalize(&mut self) {
        self.leading.clear();
        self.trailing.clear();
        self.preserved = false;
    }
}
