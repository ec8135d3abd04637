//! Element Facade - navigation and value access over one element node
//!
//! An `Element` is a thin `Copy` handle (the node's arena index); the
//! owning `Document` is passed to every operation. Equality and hashing
//! are node identity, never structural comparison.
//!
//! Lookup scope is fixed per operation:
//! - `child`, `require_child`, `has_child`, `has_children` and `value`
//!   consider direct children only
//! - `children` enumerates the entire descendant set by tag name

use super::document::Document;
use super::iter::{Elements, Nodes};
use super::node::{NodeId, XmlAttribute, XmlNode};
use super::validate_name;
use crate::error::{Error, Result};

/// Handle to one element node of a document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    id: NodeId,
}

impl Element {
    pub(crate) fn new(id: NodeId) -> Self {
        Element { id }
    }

    /// Tag name of this element
    pub fn name<'d>(&self, doc: &'d Document) -> &'d str {
        &doc.node(self.id).name
    }

    /// Immediate parent of this element
    ///
    /// Fails with `Error::NoParentElement` when the parent is the
    /// document node, i.e. this element is the root.
    pub fn parent(&self, doc: &Document) -> Result<Element> {
        let parent = doc.node(self.id).parent.ok_or(Error::NoParentElement)?;
        if doc.node(parent).is_element() {
            Ok(Element::new(parent))
        } else {
            Err(Error::NoParentElement)
        }
    }

    /// Create a new empty element and append it as the last child
    pub fn add_child(&self, doc: &mut Document, name: &str) -> Result<Element> {
        validate_name(name)?;
        let id = doc.push_node(XmlNode::element(name.to_string(), None));
        doc.link_child(self.id, id);
        Ok(Element::new(id))
    }

    /// Move an existing element subtree to be this element's last child
    ///
    /// The element is detached from its current parent first. Appending
    /// this element itself or one of its ancestors would create a cycle
    /// and fails with `Error::InvalidArgument`.
    pub fn append(&self, doc: &mut Document, child: Element) -> Result<()> {
        let mut cursor = Some(self.id);
        while let Some(id) = cursor {
            if id == child.id {
                return Err(Error::InvalidArgument(
                    "cannot append an element into its own subtree".to_string(),
                ));
            }
            cursor = doc.node(id).parent;
        }
        doc.unlink(child.id);
        doc.link_child(self.id, child.id);
        Ok(())
    }

    /// Look up the unique direct child element with the given name
    ///
    /// Scans direct children only. Zero matches is `Ok(None)`; two or
    /// more fail with `Error::AmbiguousChild` unconditionally -
    /// multiplicity is never resolved by taking the first match.
    pub fn child(&self, doc: &Document, name: &str) -> Result<Option<Element>> {
        let mut found = None;
        for id in doc.child_ids(self.id) {
            let node = doc.node(id);
            if node.is_element() && node.name == name {
                if found.is_some() {
                    return Err(Error::AmbiguousChild {
                        name: name.to_string(),
                    });
                }
                found = Some(Element::new(id));
            }
        }
        Ok(found)
    }

    /// Strict variant of `child`: absence is an error
    pub fn require_child(&self, doc: &Document, name: &str) -> Result<Element> {
        self.child(doc, name)?.ok_or_else(|| Error::MissingChild {
            name: name.to_string(),
        })
    }

    /// Lazy sequence of all descendant elements with the given name, in
    /// document order
    pub fn children<'d>(&self, doc: &'d Document, name: &str) -> Result<Elements<'d>> {
        let ids: Vec<NodeId> = doc.descendant_ids(self.id).collect();
        Elements::with_tag(name, Nodes::new(doc, ids))
    }

    /// Sequence adapter over the direct child nodes of every kind
    pub fn child_nodes<'d>(&self, doc: &'d Document) -> Nodes<'d> {
        let ids: Vec<NodeId> = doc.child_ids(self.id).collect();
        Nodes::new(doc, ids)
    }

    /// True iff at least one direct child is an element
    pub fn has_children(&self, doc: &Document) -> bool {
        doc.child_ids(self.id).any(|id| doc.node(id).is_element())
    }

    /// True iff at least one direct child element has the given name
    ///
    /// Scans all direct children; a leading non-matching node never
    /// short-circuits the search.
    pub fn has_child(&self, doc: &Document, name: &str) -> bool {
        doc.child_ids(self.id).any(|id| {
            let node = doc.node(id);
            node.is_element() && node.name == name
        })
    }

    /// Set an attribute, replacing the value in place if it exists
    pub fn set_attribute(&self, doc: &mut Document, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        let node = doc.node_mut(self.id);
        if let Some(attr) = node.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
        } else {
            node.attributes
                .push(XmlAttribute::new(name.to_string(), value.to_string()));
        }
        Ok(())
    }

    /// Attribute value, or the empty string when absent
    pub fn attribute<'d>(&self, doc: &'d Document, name: &str) -> &'d str {
        doc.node(self.id)
            .attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
            .unwrap_or("")
    }

    /// Replace this element's textual content
    ///
    /// Removes all direct text/CDATA children, then appends exactly one
    /// text child carrying `value`. The empty string is a valid value.
    pub fn set_value(&self, doc: &mut Document, value: &str) {
        let textual: Vec<NodeId> = doc
            .child_ids(self.id)
            .filter(|&id| doc.node(id).is_textual())
            .collect();
        for id in textual {
            doc.unlink(id);
        }
        let id = doc.push_node(XmlNode::text(value.to_string(), None));
        doc.link_child(self.id, id);
    }

    /// Concatenated textual content of the direct text/CDATA children,
    /// in document order; nested elements' text is never included
    pub fn value(&self, doc: &Document) -> String {
        let mut out = String::new();
        for id in doc.child_ids(self.id) {
            let node = doc.node(id);
            if node.is_textual() {
                out.push_str(&node.text);
            }
        }
        out
    }

    /// Value parsed as an i64; `Ok(None)` when the value is empty
    pub fn value_as_i64(&self, doc: &Document) -> Result<Option<i64>> {
        let value = self.value(doc);
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.parse()?))
    }

    /// Value parsed as an i32; `Ok(None)` when the value is empty
    pub fn value_as_i32(&self, doc: &Document) -> Result<Option<i32>> {
        let value = self.value(doc);
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.parse()?))
    }

    /// Value of the unique direct child, or `Ok(None)` when the child
    /// does not exist
    pub fn child_value(&self, doc: &Document, name: &str) -> Result<Option<String>> {
        Ok(self.child(doc, name)?.map(|child| child.value(doc)))
    }

    /// Set the value of the named direct child, creating it if needed
    pub fn set_child_value(&self, doc: &mut Document, name: &str, value: &str) -> Result<Element> {
        let child = match self.child(doc, name)? {
            Some(child) => child,
            None => self.add_child(doc, name)?,
        };
        child.set_value(doc, value);
        Ok(child)
    }
}
