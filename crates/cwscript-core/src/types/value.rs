use serde::{Deserialize, Serialize};

use super::scalar::Scalar;
use super::trivia::Trivia;

/// A bare scalar standing alone inside a block, such as a list element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub scalar: Scalar,
    #[serde(default)]
    pub trivia: Trivia,
}

impl Value {
    pub fn new(scalar: impl Into<Scalar>) -> Self {
        Self {
            scalar: scalar.into(),
            trivia: Trivia::default(),
        }
    }
}
