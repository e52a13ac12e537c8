mod block;
mod combinator;
mod comment;
mod condition;
mod document;
mod node;
mod property;
mod scalar;
mod trivia;
mod value;

pub use block::Block;
pub use combinator::Combinator;
pub use comment::Comment;
pub use condition::Condition;
pub use document::Document;
pub use node::Node;
pub use property::{Property, PropertyValue};
pub use scalar::Scalar;
pub use trivia::Trivia;
pub use value::Value;
