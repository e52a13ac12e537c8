use cwscript_core::types::{Block, Document, Node, Property, Scalar};
use indexmap::IndexMap;

use crate::error::ModError;

/// A game object that lives in a script file as `id = { ... }`.
///
/// Implementations map between a typed value and the body block of its
/// definition. The mapping is lossy for keys the type does not model.
pub trait ScriptEntity: Sized {
    /// Name used in error messages, e.g. `"civic"`.
    const KIND: &'static str;

    /// The definition key.
    fn id(&self) -> &str;

    /// Renders the definition body.
    fn to_block(&self) -> Block;

    /// Reads a definition body.
    ///
    /// # Errors
    ///
    /// Returns `ModError::InvalidEntity` when a modelled key holds a value
    /// the type cannot represent.
    fn from_block(id: &str, block: &Block) -> Result<Self, ModError>;

    /// The whole definition as a top-level node.
    fn to_node(&self) -> Node {
        Property::new(self.id(), self.to_block()).into()
    }
}

/// Top-level definitions: `id = { ... }` properties and `id { ... }` blocks.
pub fn definitions(document: &Document) -> impl Iterator<Item = (&str, &Block)> {
    document.children.iter().filter_map(|node| match node {
        Node::Property(p) => p.block().map(|b| (p.key.as_str(), b)),
        Node::Block(b) => b.name.as_deref().map(|name| (name, b)),
        _ => None,
    })
}

/// Reads every definition in `document` as `E`.
pub fn read_all<E: ScriptEntity>(document: &Document) -> Result<Vec<E>, ModError> {
    definitions(document)
        .map(|(id, block)| E::from_block(id, block))
        .collect()
}

pub(crate) fn invalid<E: ScriptEntity>(id: &str, reason: impl Into<String>) -> ModError {
    ModError::InvalidEntity {
        kind: E::KIND,
        id: id.to_string(),
        reason: reason.into(),
    }
}

/// Scalar properties whose keys are not in `known`, in source order.
pub(crate) fn loose_scalars(block: &Block, known: &[&str]) -> IndexMap<String, Scalar> {
    block
        .properties()
        .filter(|p| !known.contains(&p.key.as_str()))
        .filter_map(|p| p.scalar().map(|s| (p.key.clone(), s.clone())))
        .collect()
}

/// Items of a list section such as `opposites = { "a" "b" }`.
///
/// The `a = yes` form is accepted too; entries set to `no` are skipped.
pub(crate) fn list_section(block: &Block, key: &str) -> Vec<String> {
    let Some(section) = block.section(key) else {
        return Vec::new();
    };
    section
        .children
        .iter()
        .filter_map(|node| match node {
            Node::Value(v) => Some(v.scalar.text().into_owned()),
            Node::Property(p) if p.scalar().and_then(Scalar::as_bool) == Some(true) => {
                Some(p.key.clone())
            }
            _ => None,
        })
        .collect()
}

pub(crate) fn list_block<I, S>(items: I) -> Block
where
    I: IntoIterator<Item = S>,
    S: Into<Scalar>,
{
    items.into_iter().fold(Block::anonymous(), |block, item| {
        let item: Scalar = item.into();
        block.with(item)
    })
}
