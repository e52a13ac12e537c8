use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Boolean combinator keyword heading a [`Condition`](super::Condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
    Not,
    Nor,
}

impl Combinator {
    pub const ALL: [Combinator; 4] = [Self::And, Self::Or, Self::Not, Self::Nor];

    /// The keyword as written in script, always upper case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Nor => "NOR",
        }
    }

    /// Returns `true` if `s` is exactly one of the four keywords.
    pub fn is_keyword(s: &str) -> bool {
        s.parse::<Self>().is_ok()
    }
}

impl FromStr for Combinator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::InvalidCombinator(s.to_string()))
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
