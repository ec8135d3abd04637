//! Error taxonomy
//!
//! Every failure is synchronous and propagates to the caller as-is;
//! nothing is retried internally. External collaborator errors
//! (tokenizer, writer) are carried unchanged.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the document and element facades, the sequence
/// adapters, and the query engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or malformed name, or an append that would create a cycle
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// More than one direct child matched a lookup by name
    #[error("more than one child element named `{name}`")]
    AmbiguousChild { name: String },

    /// Strict lookup found no direct child with the requested name
    #[error("no child element named `{name}`")]
    MissingChild { name: String },

    /// The operation is not part of this sequence adapter's contract
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Strict cursor advance past the end of a sequence
    #[error("cursor out of bounds: position {index} of {len}")]
    CursorOutOfBounds { index: usize, len: usize },

    /// The node's parent is the document itself, not an element
    #[error("node has no parent element")]
    NoParentElement,

    /// Tokenizer failure while parsing
    #[error("parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Malformed attribute encountered while parsing
    #[error("parse error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Document-structure violation found while building the tree
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Writer failure while serializing
    #[error("serialize error: {0}")]
    Serialize(String),

    /// The query expression is outside the supported grammar
    #[error("invalid query expression: {0}")]
    QueryCompile(String),

    /// Non-empty element value that is not a base-10 integer
    #[error("value is not a valid integer: {0}")]
    NumberFormat(#[from] std::num::ParseIntError),
}
