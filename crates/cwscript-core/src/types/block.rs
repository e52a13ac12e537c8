use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::node::{self, Node};
use super::property::{Property, PropertyValue};
use super::scalar::Scalar;
use super::trivia::Trivia;

/// A brace-delimited group of nodes, optionally named (`name { ... }`).
///
/// The value side of `key = { ... }` is an anonymous block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
    /// Layout between the name and `{`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name_space: String,
    /// Layout after `{`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub open_space: String,
    /// Layout before `}`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub close_space: String,
    /// Comments inside the braces ahead of the first child, or in an
    /// otherwise empty body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_comments: Vec<String>,
    #[serde(default)]
    pub trivia: Trivia,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        node::properties(&self.children)
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        node::find_property(&self.children, key)
    }

    /// The scalar value of `key`, if present and scalar.
    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.property(key).and_then(Property::scalar)
    }

    /// The block under `key = { ... }` or `key { ... }`.
    pub fn section(&self, key: &str) -> Option<&Block> {
        node::find_section(&self.children, key)
    }

    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.children.iter().filter_map(Node::as_condition)
    }

    /// Bare list elements, e.g. the entries of `tags = { "a" "b" }`.
    pub fn values(&self) -> impl Iterator<Item = &Scalar> {
        self.children.iter().filter_map(Node::as_value)
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<PropertyValue>) {
        node::set_property(&mut self.children, key, value.into());
    }

    pub fn remove_property(&mut self, key: &str) -> usize {
        node::remove_property(&mut self.children, key)
    }

    pub(crate) fn normalize(&mut self) {
        self.name_space.clear();
        self.open_space.clear();
        self.close_space.clear();
        self.trivia.normalize();
        for child in &mut self.children {
            child.normalize();
        }
    }
}
