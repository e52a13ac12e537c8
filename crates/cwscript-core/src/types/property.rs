use serde::{Deserialize, Serialize};

use super::block::Block;
use super::condition::Condition;
use super::scalar::Scalar;
use super::trivia::Trivia;
use crate::error::CoreError;

/// `key <operator> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    /// `=` or a comparison such as `>`, `<=`, `!=`.
    pub operator: String,
    pub value: PropertyValue,
    /// Layout between the key and the operator.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_space: String,
    /// Layout between the operator and the value.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator_space: String,
    #[serde(default)]
    pub trivia: Trivia,
}

/// The right-hand side of a [`Property`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PropertyValue {
    Scalar(Scalar),
    Block(Block),
    Condition(Condition),
    /// No value; rendered as `null`.
    Absent,
}

impl Property {
    pub const ASSIGN: &'static str = "=";

    /// Creates `key = value`.
    pub fn new(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            key: key.into(),
            operator: Self::ASSIGN.to_string(),
            value: value.into(),
            key_space: String::new(),
            operator_space: String::new(),
            trivia: Trivia::default(),
        }
    }

    /// Creates `key <operator> value`, validating the key and operator.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyKey` or `CoreError::InvalidOperator`.
    pub fn with_operator(
        key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<Self, CoreError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CoreError::EmptyKey);
        }
        let operator = operator.into();
        if !is_valid_operator(&operator) {
            return Err(CoreError::InvalidOperator(operator));
        }
        Ok(Self {
            operator,
            ..Self::new(key, value)
        })
    }

    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.value {
            PropertyValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn block(&self) -> Option<&Block> {
        match &self.value {
            PropertyValue::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn block_mut(&mut self) -> Option<&mut Block> {
        match &mut self.value {
            PropertyValue::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match &self.value {
            PropertyValue::Condition(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_comparison(&self) -> bool {
        self.operator != Self::ASSIGN
    }

    pub(crate) fn normalize(&mut self) {
        self.key_space.clear();
        self.operator_space.clear();
        self.trivia.normalize();
        match &mut self.value {
            PropertyValue::Block(b) => b.normalize(),
            PropertyValue::Condition(c) => c.normalize(),
            PropertyValue::Scalar(_) | PropertyValue::Absent => {}
        }
    }
}

/// `=` or a run of `<`, `>`, `=`, `!` starting with one of `<`, `>`, `!`.
pub(crate) fn is_valid_operator(op: &str) -> bool {
    if op == Property::ASSIGN {
        return true;
    }
    let mut chars = op.chars();
    matches!(chars.next(), Some('<' | '>' | '!')) && chars.all(|c| matches!(c, '<' | '>' | '=' | '!'))
}

impl From<Scalar> for PropertyValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Block> for PropertyValue {
    fn from(b: Block) -> Self {
        Self::Block(b)
    }
}

impl From<Condition> for PropertyValue {
    fn from(c: Condition) -> Self {
        Self::Condition(c)
    }
}

impl From<Option<Scalar>> for PropertyValue {
    fn from(s: Option<Scalar>) -> Self {
        s.map_or(Self::Absent, Self::Scalar)
    }
}
