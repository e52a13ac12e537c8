use serde::{Deserialize, Serialize};

use super::block::Block;
use super::node::{self, Node};
use super::property::{Property, PropertyValue};
use super::trivia::Trivia;

/// A whole script file: ordered top-level nodes plus a logical filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path of the file relative to its mod root, e.g. `common/traits/x.txt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
    /// `trailing` holds text left at end of input that no node owns.
    #[serde(default)]
    pub trivia: Trivia,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

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

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        node::properties(&self.children)
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        node::find_property(&self.children, key)
    }

    pub fn section(&self, key: &str) -> Option<&Block> {
        node::find_section(&self.children, key)
    }

    /// Top-level `key = { ... }` entries, as defined by most game database files.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.properties()
            .filter_map(|p| p.block().map(|b| (p.key.as_str(), b)))
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<PropertyValue>) {
        node::set_property(&mut self.children, key, value.into());
    }

    pub fn remove_property(&mut self, key: &str) -> usize {
        node::remove_property(&mut self.children, key)
    }

    /// Turns a formatting-preserving tree into a generated one.
    ///
    /// All stored layout is dropped so the document prints in canonical
    /// form. Comments attached to nodes are kept.
    pub fn strip_formatting(&mut self) {
        self.trivia.normalize();
        for child in &mut self.children {
            child.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, Scalar};

    #[test]
    fn named_document() {
        let d = Document::named("common/traits/mod_traits.txt");
        assert_eq!(d.filename.as_deref(), Some("common/traits/mod_traits.txt"));
        assert!(d.is_empty());
    }

    #[test]
    fn definitions_lists_assigned_blocks() {
        let d = Document::new()
            .with(Comment::new("header"))
            .with(Property::new("trait_a", Block::anonymous()))
            .with(Property::new("version", Scalar::string("1")))
            .with(Property::new("trait_b", Block::anonymous()));
        let ids: Vec<_> = d.definitions().map(|(id, _)| id).collect();
        assert_eq!(ids, ["trait_a", "trait_b"]);
        assert_eq!(d.len(), 4);
    }

    #[test]
    fn strip_formatting_clears_preserved_flags() {
        let mut prop = Property::new("a", Scalar::number(1));
        prop.key_space = "   ".into();
        prop.trivia = Trivia {
            trailing: " # keep\n".into(),
            comments: vec!["# keep".into()],
            preserved: true,
            ..Trivia::default()
        };
        let mut d = Document::new().with(prop);
        d.trivia = Trivia::preserved();

        d.strip_formatting();

        assert!(!d.trivia.preserved);
        let p = d.children[0].as_property().unwrap();
        assert!(p.key_space.is_empty());
        assert!(!p.trivia.preserved);
        assert_eq!(p.trivia.comments, vec!["# keep".to_string()]);
    }

    #[test]
    fn set_and_remove_top_level_property() {
        let mut d = Document::new();
        d.set_property("name", Scalar::string("My Mod"));
        d.set_property("name", Scalar::string("Renamed"));
        assert_eq!(d.len(), 1);
        assert_eq!(
            d.property("name").and_then(Property::scalar).map(|s| s.text().into_owned()),
            Some("Renamed".to_string())
        );
        assert_eq!(d.remove_property("name"), 1);
        assert!(d.is_empty());
    }
}
