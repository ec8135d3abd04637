//! xmlwrap - a small object-tree facade over an XML document
//!
//! Creates, parses, navigates, mutates, and serializes XML trees, and
//! evaluates a constrained path-query subset over them:
//! - [`Document`]: owns the tree; creation, parsing, cloning,
//!   serialization, and the query entry point
//! - [`Element`]: navigation and value access over one element node
//! - [`Nodes`] / [`Elements`]: lazy, single-pass sequences over tree
//!   nodes
//!
//! Tokenizing and event writing are delegated to quick-xml; the tree,
//! the facade semantics, and the query subset live here.
//!
//! # Building and reading a tree
//!
//! ```
//! use xmlwrap::Document;
//!
//! let mut doc = Document::create("library")?;
//! let root = doc.root();
//! let book = root.add_child(&mut doc, "book")?;
//! book.set_attribute(&mut doc, "isbn", "9781718503106")?;
//! book.set_child_value(&mut doc, "title", "The Book")?;
//!
//! let found = root.require_child(&doc, "book")?;
//! assert_eq!(found.attribute(&doc, "isbn"), "9781718503106");
//! assert_eq!(found.child_value(&doc, "title")?, Some("The Book".to_string()));
//! # Ok::<(), xmlwrap::Error>(())
//! ```
//!
//! # Querying
//!
//! ```
//! use xmlwrap::Document;
//!
//! let doc = Document::parse(r#"<foo><bar baz="true"/><bar baz="false"/></foo>"#)?;
//! let flags: Vec<String> = doc
//!     .query("//bar")?
//!     .map(|bar| bar.attribute(&doc, "baz").to_string())
//!     .collect();
//! assert_eq!(flags, ["true", "false"]);
//! # Ok::<(), xmlwrap::Error>(())
//! ```

mod dom;
mod error;
mod query;

pub use dom::{Document, Element, Elements, NodeId, NodeKind, Nodes};
pub use error::{Error, Result};
