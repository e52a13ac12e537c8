use serde::{Deserialize, Serialize};

use super::trivia::Trivia;

/// A `#` comment kept as a node of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text including the leading `#`.
    pub text: String,
    #[serde(default)]
    pub trivia: Trivia,
}

impl Comment {
    /// Creates a comment, adding `# ` if `text` lacks the marker.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let text = if text.starts_with('#') {
            text
        } else {
            format!("# {text}")
        };
        Self {
            text,
            trivia: Trivia::default(),
        }
    }

    /// The comment body without the marker and surrounding blanks.
    pub fn body(&self) -> &str {
        self.text.trim_start_matches('#').trim()
    }
}
