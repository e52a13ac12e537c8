use serde::{Deserialize, Serialize};

use super::combinator::Combinator;
use super::node::{self, Node};
use super::property::Property;
use super::scalar::Scalar;
use super::trivia::Trivia;

/// A boolean combinator over a brace-enclosed operand list: `OR = { ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub combinator: Combinator,
    /// The `=` between keyword and `{`, when written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default)]
    pub operands: Vec<Node>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keyword_space: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator_space: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub open_space: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub close_space: String,
    /// Comments inside the braces ahead of the first operand.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_comments: Vec<String>,
    #[serde(default)]
    pub trivia: Trivia,
}

impl Condition {
    /// `AND { ... }` form.
    pub fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            operator: None,
            operands: Vec::new(),
            keyword_space: String::new(),
            operator_space: String::new(),
            open_space: String::new(),
            close_space: String::new(),
            inner_comments: Vec::new(),
            trivia: Trivia::default(),
        }
    }

    /// `AND = { ... }` form.
    pub fn assigned(combinator: Combinator) -> Self {
        Self {
            operator: Some(Property::ASSIGN.to_string()),
            ..Self::new(combinator)
        }
    }

    pub fn with(mut self, operand: impl Into<Node>) -> Self {
        self.push(operand);
        self
    }

    pub fn push(&mut self, operand: impl Into<Node>) {
        self.operands.push(operand.into());
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        node::properties(&self.operands)
    }

    /// Scalar values of every operand `key = value`, in order.
    pub fn scalars_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Scalar> + 'a {
        self.properties()
            .filter(move |p| p.key == key)
            .filter_map(Property::scalar)
    }

    pub(crate) fn normalize(&mut self) {
        self.keyword_space.clear();
        self.operator_space.clear();
        self.open_space.clear();
        self.close_space.clear();
        self.trivia.normalize();
        for operand in &mut self.operands {
            operand.normalize();
        }
    }
}
