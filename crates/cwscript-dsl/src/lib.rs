//! # cwscript-dsl
//!
//! Lexer, parsers and printer for Clausewitz-style game scripts.
//!
//! This crate provides:
//! - A lexer that turns script text into tokens, layout included
//! - A strict parser that builds a clean tree and rejects malformed input
//! - A formatting-preserving parser that keeps every byte of layout
//! - A printer that renders preserved nodes verbatim and generated nodes
//!   in canonical tab-indented form
//!
//! # Example
//!
//! ```
//! use cwscript_core::types::{Property, Scalar};
//! use cwscript_dsl::{parse_preserving, parse_str, print};
//!
//! let source = "civic_example = {\n    # keep me\n    cost  = 2\n}\n";
//!
//! // Unedited text round-trips exactly.
//! let mut document = parse_preserving(source);
//! assert_eq!(print(&document), source);
//!
//! // Appended nodes are laid out on their own line.
//! document.push(Property::new("other", Scalar::string("value")));
//! assert!(print(&document).ends_with("other = \"value\"\n"));
//!
//! // The strict parser ignores layout and rejects malformed input.
//! assert!(parse_str("= 1").is_err());
//! ```

pub mod error;
mod lexer;
pub mod parser;
pub mod preserving;
pub mod printer;
pub mod token;

pub use error::{ScriptError, Span};
pub use lexer::{tokenize, Token};
pub use parser::{parse, parse_str, parse_str_named};
pub use preserving::{parse_preserving, parse_preserving_named};
pub use printer::{print, print_node};
pub use token::TokenKind;
