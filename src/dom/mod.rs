//! DOM Module - arena-backed XML tree with facade types
//!
//! Layout:
//! - Nodes live in a `Vec` arena owned by `Document`, addressed by
//!   `NodeId` indices with doubly-linked sibling/child links
//! - `Element` is a `Copy` handle over a node id; equality is identity
//! - `Nodes`/`Elements` are single-pass sequence adapters over id
//!   snapshots

mod document;
mod element;
mod iter;
mod node;

pub use document::Document;
pub use element::Element;
pub use iter::{Elements, Nodes};
pub use node::{NodeId, NodeKind};

pub(crate) use document::DOCUMENT_NODE;

use crate::error::{Error, Result};

/// Check that a string is usable as an element or attribute name
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| Error::InvalidArgument("the name cannot be empty".to_string()))?;
    if !is_name_start_char(first) || !chars.all(is_name_char) {
        return Err(Error::InvalidArgument(format!(
            "`{}` is not a valid XML name",
            name
        )));
    }
    Ok(())
}

#[inline]
fn is_name_start_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("foo").is_ok());
        assert!(validate_name("_private").is_ok());
        assert!(validate_name("ns:tag").is_ok());
        assert!(validate_name("with-dash.and.dot").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("1abc").is_err());
        assert!(validate_name("a b").is_err());
        assert!(validate_name("<tag>").is_err());
    }
}
