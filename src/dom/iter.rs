//! Sequence adapters over tree nodes
//!
//! `Nodes` turns an ordered collection of node ids into a single-pass,
//! forward-only cursor with externally tracked position. `Elements`
//! wraps it and lazily filters down to element handles, optionally by
//! tag name.
//!
//! Both sequences snapshot their id set at construction time, so a
//! structural mutation of the tree can never shift the cursor
//! mid-iteration (the borrow on the document rules it out entirely).
//! Reaching the end is terminal; build a new sequence to iterate again.

use super::document::Document;
use super::element::Element;
use super::node::NodeId;
use crate::error::{Error, Result};

/// Single-pass forward cursor over a snapshot of node ids
pub struct Nodes<'d> {
    doc: &'d Document,
    ids: Vec<NodeId>,
    pos: usize,
}

impl<'d> Nodes<'d> {
    pub(crate) fn new(doc: &'d Document, ids: Vec<NodeId>) -> Self {
        Nodes { doc, ids, pos: 0 }
    }

    /// True while the cursor is within bounds
    pub fn has_next(&self) -> bool {
        self.pos < self.ids.len()
    }

    /// Return the node at the cursor and advance
    ///
    /// Advancing past the end is a contract violation and fails with
    /// `Error::CursorOutOfBounds`.
    pub fn try_next(&mut self) -> Result<NodeId> {
        if self.pos >= self.ids.len() {
            return Err(Error::CursorOutOfBounds {
                index: self.pos,
                len: self.ids.len(),
            });
        }
        let id = self.ids[self.pos];
        self.pos += 1;
        Ok(id)
    }

    /// In-place removal is not part of this adapter's contract
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::Unsupported("removal through a node sequence"))
    }
}

impl std::fmt::Debug for Nodes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nodes")
            .field("ids", &self.ids)
            .field("pos", &self.pos)
            .finish()
    }
}

impl Iterator for Nodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ids.len() - self.pos;
        (remaining, Some(remaining))
    }
}

/// Lazy element sequence over a node cursor
///
/// With a tag filter it yields only elements with that tag name; without
/// one it yields every element node (used by the query entry point).
#[derive(Debug)]
pub struct Elements<'d> {
    source: Nodes<'d>,
    tag: Option<String>,
    pending: Option<Element>,
}

impl<'d> Elements<'d> {
    /// Element sequence without a tag filter
    pub(crate) fn any(source: Nodes<'d>) -> Self {
        Elements {
            source,
            tag: None,
            pending: None,
        }
    }

    /// Element sequence filtered by tag name
    pub(crate) fn with_tag(tag: &str, source: Nodes<'d>) -> Result<Self> {
        if tag.is_empty() {
            return Err(Error::InvalidArgument(
                "the tag name cannot be empty".to_string(),
            ));
        }
        Ok(Elements {
            source,
            tag: Some(tag.to_string()),
            pending: None,
        })
    }

    /// Scan forward for the next matching element
    ///
    /// The scan consumes intervening non-matching nodes from the source;
    /// the match is cached, so repeated calls without `try_next` are
    /// idempotent and do not re-scan.
    pub fn has_next(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        let doc = self.source.doc;
        while let Ok(id) = self.source.try_next() {
            let node = doc.node(id);
            if !node.is_element() {
                continue;
            }
            if let Some(tag) = &self.tag {
                if node.name != *tag {
                    continue;
                }
            }
            self.pending = Some(Element::new(id));
            return true;
        }
        false
    }

    /// Return the next matching element and advance
    ///
    /// Performs the same scan as `has_next` first, so it is safe to call
    /// without one. Fails with `Error::CursorOutOfBounds` once the
    /// source is exhausted.
    pub fn try_next(&mut self) -> Result<Element> {
        if self.has_next() {
            if let Some(element) = self.pending.take() {
                return Ok(element);
            }
        }
        Err(Error::CursorOutOfBounds {
            index: self.source.pos,
            len: self.source.ids.len(),
        })
    }

    /// In-place removal is not part of this adapter's contract
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::Unsupported("removal through an element sequence"))
    }
}

impl Iterator for Elements<'_> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.has_next() {
            self.pending.take()
        } else {
            None
        }
    }
}
