//! # cwscript-core
//!
//! Syntax tree for Clausewitz-style game scripts.
//!
//! A parsed script is a [`Document`](types::Document) holding an ordered list
//! of [`Node`](types::Node)s. Every node carries [`Trivia`](types::Trivia):
//! nodes read by the formatting-preserving parser keep the exact whitespace
//! and comments around them, while nodes built in code or by the strict
//! parser leave it empty and are laid out canonically when printed.

pub mod error;
pub mod types;

pub use error::CoreError;
