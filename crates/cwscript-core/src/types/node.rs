use serde::{Deserialize, Serialize};

use super::block::Block;
use super::comment::Comment;
use super::condition::Condition;
use super::property::{Property, PropertyValue};
use super::scalar::Scalar;
use super::trivia::Trivia;
use super::value::Value;

/// One element of a document or of a block's children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Block(Block),
    Property(Property),
    Condition(Condition),
    Value(Value),
    /// A comment standing on its own, outside any node's layout.
    Comment(Comment),
}

impl Node {
    pub fn trivia(&self) -> &Trivia {
        match self {
            Self::Block(b) => &b.trivia,
            Self::Property(p) => &p.trivia,
            Self::Condition(c) => &c.trivia,
            Self::Value(v) => &v.trivia,
            Self::Comment(c) => &c.trivia,
        }
    }

    pub fn trivia_mut(&mut self) -> &mut Trivia {
        match self {
            Self::Block(b) => &mut b.trivia,
            Self::Property(p) => &mut p.trivia,
            Self::Condition(c) => &mut c.trivia,
            Self::Value(v) => &mut v.trivia,
            Self::Comment(c) => &mut c.trivia,
        }
    }

    /// Returns `true` if this node was read by the formatting-preserving parser.
    pub fn is_preserved(&self) -> bool {
        self.trivia().preserved
    }

    /// Short lower-case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Block(_) => "block",
            Self::Property(_) => "property",
            Self::Condition(_) => "condition",
            Self::Value(_) => "value",
            Self::Comment(_) => "comment",
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Self::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Self::Condition(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Scalar> {
        match self {
            Self::Value(v) => Some(&v.scalar),
            _ => None,
        }
    }

    /// Clears stored layout on this node and everything below it, so it
    /// renders in canonical form. Attached comments are kept.
    pub fn normalize(&mut self) {
        match self {
            Self::Block(b) => b.normalize(),
            Self::Property(p) => p.normalize(),
            Self::Condition(c) => c.normalize(),
            Self::Value(v) => v.trivia.normalize(),
            Self::Comment(c) => c.trivia.normalize(),
        }
    }
}

impl From<Block> for Node {
    fn from(b: Block) -> Self {
        Self::Block(b)
    }
}

impl From<Property> for Node {
    fn from(p: Property) -> Self {
        Self::Property(p)
    }
}

impl From<Condition> for Node {
    fn from(c: Condition) -> Self {
        Self::Condition(c)
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Comment> for Node {
    fn from(c: Comment) -> Self {
        Self::Comment(c)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Self::Value(Value::new(s))
    }
}

// -- Child queries shared by Document, Block and Condition --

pub(crate) fn properties(children: &[Node]) -> impl Iterator<Item = &Property> {
    children.iter().filter_map(Node::as_property)
}

pub(crate) fn find_property<'a>(children: &'a [Node], key: &str) -> Option<&'a Property> {
    properties(children).find(|p| p.key == key)
}

/// Finds `key = { ... }` or `key { ... }` among `children`.
pub(crate) fn find_section<'a>(children: &'a [Node], key: &str) -> Option<&'a Block> {
    children.iter().find_map(|node| match node {
        Node::Property(p) if p.key == key => match &p.value {
            PropertyValue::Block(b) => Some(b),
            _ => None,
        },
        Node::Block(b) if b.name.as_deref() == Some(key) => Some(b),
        _ => None,
    })
}

/// Replaces the value of the first property named `key`, or appends one.
pub(crate) fn set_property(children: &mut Vec<Node>, key: &str, value: PropertyValue) {
    let existing = children.iter_mut().find_map(|node| match node {
        Node::Property(p) if p.key == key => Some(p),
        _ => None,
    });
    match existing {
        Some(p) => p.value = value,
        None => children.push(Node::Property(Property::new(key, value))),
    }
}

/// Removes every property named `key`, returning how many were removed.
pub(crate) fn remove_property(children: &mut Vec<Node>, key: &str) -> usize {
    let before = children.len();
    children.retain(|node| !matches!(node, Node::Property(p) if p.key == key));
    before - children.len()
}
