//! XML Document - arena-backed tree plus the document facade
//!
//! Storage:
//! - One `Vec` arena of nodes; slot 0 is the synthetic document node
//! - Doubly-linked sibling/child links, ids assigned in insertion order
//! - Exactly one root element linked under the document node
//!
//! Parsing and serialization delegate tokenizing and event writing to
//! quick-xml; this module only builds the tree from events and walks it
//! back out. Query compilation results are kept in a per-document LRU
//! cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::element::Element;
use super::iter::{Elements, Nodes};
use super::node::{NodeId, NodeKind, XmlAttribute, XmlNode};
use super::validate_name;
use crate::error::{Error, Result};
use crate::query::{self, CompiledQuery};

/// The document node occupies slot 0 of the arena
pub(crate) const DOCUMENT_NODE: NodeId = 0;

/// Capacity of the per-document compiled query cache
const QUERY_CACHE_CAP: usize = 32;

/// Line ending appended to pretty-printed output
#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// An XML document owning one tree of nodes
pub struct Document {
    nodes: Vec<XmlNode>,
    root: NodeId,
    queries: RefCell<LruCache<String, Rc<CompiledQuery>>>,
}

impl Document {
    /// Create a new document with a single root element and no other
    /// content
    pub fn create(root_name: &str) -> Result<Document> {
        validate_name(root_name)?;
        let mut doc = Document::with_document_node();
        let root = doc.push_node(XmlNode::element(root_name.to_string(), None));
        doc.link_child(DOCUMENT_NODE, root);
        doc.root = root;
        Ok(doc)
    }

    /// Parse an XML document string
    ///
    /// Tokenizing is delegated to quick-xml and its errors propagate
    /// unchanged. The single-root invariant is enforced here: zero or
    /// multiple root elements and stray top-level content are
    /// `Error::Malformed`. Text and CDATA content are preserved
    /// verbatim; comments and processing instructions are kept as tree
    /// nodes for round-trip fidelity.
    pub fn parse(text: &str) -> Result<Document> {
        let mut doc = Document::with_document_node();
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<NodeId> = vec![DOCUMENT_NODE];
        let mut root: Option<NodeId> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let parent = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    let id = doc.append_element(&start, parent, &mut root)?;
                    stack.push(id);
                }
                Event::Empty(start) => {
                    let parent = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    doc.append_element(&start, parent, &mut root)?;
                }
                Event::End(end) => {
                    let end_name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    let top = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    if top == DOCUMENT_NODE {
                        return Err(Error::Malformed(format!(
                            "unexpected end tag: </{}> without matching start tag",
                            end_name
                        )));
                    }
                    if doc.node(top).name != end_name {
                        return Err(Error::Malformed(format!(
                            "tag mismatch: <{}> closed with </{}>",
                            doc.node(top).name, end_name
                        )));
                    }
                    stack.pop();
                }
                Event::Text(content) => {
                    let parent = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    let text = content.unescape()?.into_owned();
                    if parent == DOCUMENT_NODE {
                        if text.chars().all(char::is_whitespace) {
                            continue;
                        }
                        return Err(Error::Malformed(
                            "text content not allowed at document level".to_string(),
                        ));
                    }
                    let id = doc.push_node(XmlNode::text(text, None));
                    doc.link_child(parent, id);
                }
                Event::CData(content) => {
                    let parent = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    if parent == DOCUMENT_NODE {
                        return Err(Error::Malformed(
                            "CDATA section not allowed at document level".to_string(),
                        ));
                    }
                    let text = String::from_utf8_lossy(&content).into_owned();
                    let id = doc.push_node(XmlNode::cdata(text, None));
                    doc.link_child(parent, id);
                }
                Event::Comment(content) => {
                    let parent = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    let text = String::from_utf8_lossy(&content).into_owned();
                    let id = doc.push_node(XmlNode::comment(text, None));
                    doc.link_child(parent, id);
                }
                Event::PI(content) => {
                    let parent = *stack.last().unwrap_or(&DOCUMENT_NODE);
                    let text = String::from_utf8_lossy(&content).into_owned();
                    let id = doc.push_node(XmlNode::processing_instruction(text, None));
                    doc.link_child(parent, id);
                }
                Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if stack.len() > 1 {
            let name = doc.node(stack[1]).name.clone();
            return Err(Error::Malformed(format!("unclosed tag: <{}>", name)));
        }
        match root {
            Some(id) => {
                doc.root = id;
                Ok(doc)
            }
            None => Err(Error::Malformed("document has no root element".to_string())),
        }
    }

    /// Handle to the root element
    pub fn root(&self) -> Element {
        Element::new(self.root)
    }

    /// Evaluate a path expression against the whole document
    ///
    /// The expression is compiled through the per-document LRU cache and
    /// evaluated to a node-set in document order, exposed as a lazy
    /// element sequence. An expression outside the supported grammar
    /// fails with `Error::QueryCompile`.
    pub fn query(&self, expression: &str) -> Result<Elements<'_>> {
        let compiled = {
            let mut cache = self.queries.borrow_mut();
            match cache.get(expression) {
                Some(compiled) => Rc::clone(compiled),
                None => {
                    let compiled = Rc::new(query::compile(expression)?);
                    cache.put(expression.to_string(), Rc::clone(&compiled));
                    compiled
                }
            }
        };
        let ids = query::evaluate(self, &compiled);
        Ok(Elements::any(Nodes::new(self, ids)))
    }

    /// Serialize the document
    ///
    /// Compact mode renders everything on one line after the XML
    /// declaration. Pretty mode indents nested elements by two spaces
    /// and terminates the document with the platform line ending.
    pub fn to_xml(&self, pretty: bool) -> Result<String> {
        let bytes = if pretty {
            let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
            self.write_document(&mut writer)?;
            writer.into_inner()
        } else {
            let mut writer = Writer::new(Vec::new());
            self.write_document(&mut writer)?;
            writer.into_inner()
        };
        let mut xml = String::from_utf8(bytes).map_err(|e| Error::Serialize(e.to_string()))?;
        if pretty {
            xml.push_str(LINE_ENDING);
        }
        Ok(xml)
    }

    /// Kind of the node behind an id
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id as usize).map(|node| node.kind)
    }

    /// Tag name, if the id refers to an element node
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes
            .get(id as usize)
            .and_then(|node| node.is_element().then(|| node.name.as_str()))
    }

    /// Text content, if the id refers to a text or CDATA node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.nodes
            .get(id as usize)
            .and_then(|node| node.is_textual().then(|| node.text.as_str()))
    }

    // =========================================================================
    // Arena internals
    // =========================================================================

    fn with_document_node() -> Document {
        let mut nodes = Vec::with_capacity(16);
        nodes.push(XmlNode::document());
        Document {
            nodes,
            root: DOCUMENT_NODE,
            queries: Document::new_query_cache(),
        }
    }

    fn new_query_cache() -> RefCell<LruCache<String, Rc<CompiledQuery>>> {
        let cap = NonZeroUsize::new(QUERY_CACHE_CAP).unwrap_or(NonZeroUsize::MIN);
        RefCell::new(LruCache::new(cap))
    }

    pub(crate) fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id as usize]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut XmlNode {
        &mut self.nodes[id as usize]
    }

    /// Add a node to the arena, returning its id
    pub(crate) fn push_node(&mut self, node: XmlNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Link a node as the last child of its parent
    pub(crate) fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child = self.node(parent_id).last_child;
        if let Some(last_id) = last_child {
            self.node_mut(child_id).prev_sibling = Some(last_id);
            self.node_mut(last_id).next_sibling = Some(child_id);
        } else {
            self.node_mut(parent_id).first_child = Some(child_id);
        }
        self.node_mut(parent_id).last_child = Some(child_id);
        self.node_mut(child_id).parent = Some(parent_id);
    }

    /// Detach a node from its parent and siblings
    ///
    /// The arena slot remains allocated; the subtree simply becomes
    /// unreachable from the root unless relinked.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = self.node(id);
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if let Some(prev_id) = prev {
            self.node_mut(prev_id).next_sibling = next;
        }
        if let Some(next_id) = next {
            self.node_mut(next_id).prev_sibling = prev;
        }
        if let Some(parent_id) = parent {
            let parent_node = self.node_mut(parent_id);
            if parent_node.first_child == Some(id) {
                parent_node.first_child = next;
            }
            if parent_node.last_child == Some(id) {
                parent_node.last_child = prev;
            }
        }
        let node = self.node_mut(id);
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Iterate over the direct children of a node
    pub(crate) fn child_ids(&self, id: NodeId) -> ChildIds<'_> {
        ChildIds {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Iterate over all descendants of a node, depth-first (document
    /// order), excluding the node itself
    pub(crate) fn descendant_ids(&self, id: NodeId) -> DescendantIds<'_> {
        let mut stack = Vec::new();
        let mut child_id = self.node(id).last_child;
        while let Some(cid) = child_id {
            stack.push(cid);
            child_id = self.node(cid).prev_sibling;
        }
        DescendantIds { doc: self, stack }
    }

    /// Position of every reachable node in document order
    ///
    /// Ids are assigned in insertion order, not document order, so query
    /// results are sorted through this map instead.
    pub(crate) fn document_order(&self) -> HashMap<NodeId, usize> {
        let mut order = HashMap::with_capacity(self.nodes.len());
        order.insert(DOCUMENT_NODE, 0);
        for (position, id) in self.descendant_ids(DOCUMENT_NODE).enumerate() {
            order.insert(id, position + 1);
        }
        order
    }

    // =========================================================================
    // Event building and writing
    // =========================================================================

    /// Append an element built from a start tag
    fn append_element(
        &mut self,
        start: &BytesStart<'_>,
        parent: NodeId,
        root: &mut Option<NodeId>,
    ) -> Result<NodeId> {
        if parent == DOCUMENT_NODE && root.is_some() {
            return Err(Error::Malformed(
                "document has multiple root elements".to_string(),
            ));
        }
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut node = XmlNode::element(name, None);
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            node.attributes.push(XmlAttribute::new(key, value));
        }
        let id = self.push_node(node);
        self.link_child(parent, id);
        if parent == DOCUMENT_NODE {
            *root = Some(id);
        }
        Ok(id)
    }

    fn write_document<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(serialize_error)?;
        let children: Vec<NodeId> = self.child_ids(DOCUMENT_NODE).collect();
        for id in children {
            self.write_node(writer, id)?;
        }
        Ok(())
    }

    fn write_node<W: std::io::Write>(&self, writer: &mut Writer<W>, id: NodeId) -> Result<()> {
        let node = self.node(id);
        match node.kind {
            NodeKind::Element => {
                let mut start = BytesStart::new(node.name.as_str());
                for attr in &node.attributes {
                    start.push_attribute((attr.name.as_str(), attr.value.as_str()));
                }
                if node.first_child.is_none() {
                    writer
                        .write_event(Event::Empty(start))
                        .map_err(serialize_error)?;
                } else {
                    writer
                        .write_event(Event::Start(start))
                        .map_err(serialize_error)?;
                    for child in self.child_ids(id) {
                        self.write_node(writer, child)?;
                    }
                    writer
                        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
                        .map_err(serialize_error)?;
                }
            }
            NodeKind::Text => writer
                .write_event(Event::Text(BytesText::new(&node.text)))
                .map_err(serialize_error)?,
            NodeKind::CData => writer
                .write_event(Event::CData(BytesCData::new(node.text.as_str())))
                .map_err(serialize_error)?,
            NodeKind::Comment => writer
                .write_event(Event::Comment(BytesText::from_escaped(node.text.as_str())))
                .map_err(serialize_error)?,
            NodeKind::ProcessingInstruction => writer
                .write_event(Event::PI(BytesPI::new(node.name.as_str())))
                .map_err(serialize_error)?,
            NodeKind::Document => {}
        }
        Ok(())
    }

    // =========================================================================
    // Structural comparison
    // =========================================================================

    fn subtree_eq(&self, id: NodeId, other: &Document, other_id: NodeId) -> bool {
        let a = self.node(id);
        let b = other.node(other_id);
        if a.kind != b.kind || a.name != b.name || a.text != b.text {
            return false;
        }
        if !attrs_eq(&a.attributes, &b.attributes) {
            return false;
        }
        let mine: Vec<NodeId> = self.child_ids(id).collect();
        let theirs: Vec<NodeId> = other.child_ids(other_id).collect();
        mine.len() == theirs.len()
            && mine
                .iter()
                .zip(&theirs)
                .all(|(&x, &y)| self.subtree_eq(x, other, y))
    }

    fn hash_subtree<H: Hasher>(&self, id: NodeId, state: &mut H) {
        let node = self.node(id);
        node.kind.hash(state);
        node.name.hash(state);
        node.text.hash(state);
        let mut attrs: Vec<(&String, &String)> = node
            .attributes
            .iter()
            .map(|a| (&a.name, &a.value))
            .collect();
        attrs.sort();
        attrs.hash(state);
        let children: Vec<NodeId> = self.child_ids(id).collect();
        children.len().hash(state);
        for child in children {
            self.hash_subtree(child, state);
        }
    }
}

/// Attribute order is not significant for document comparison
fn attrs_eq(a: &[XmlAttribute], b: &[XmlAttribute]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left: Vec<(&String, &String)> = a.iter().map(|x| (&x.name, &x.value)).collect();
    let mut right: Vec<(&String, &String)> = b.iter().map(|x| (&x.name, &x.value)).collect();
    left.sort();
    right.sort();
    left == right
}

fn serialize_error<E: fmt::Display>(error: E) -> Error {
    Error::Serialize(error.to_string())
}

impl Clone for Document {
    /// Deep copy: the new document shares no nodes with the original;
    /// the compiled query cache starts empty
    fn clone(&self) -> Document {
        Document {
            nodes: self.nodes.clone(),
            root: self.root,
            queries: Document::new_query_cache(),
        }
    }
}

impl PartialEq for Document {
    /// Structural tree comparison (kind, name, text, attributes as
    /// sets, child order), starting at the document node
    fn eq(&self, other: &Document) -> bool {
        self.subtree_eq(DOCUMENT_NODE, other, DOCUMENT_NODE)
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_subtree(DOCUMENT_NODE, state);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.node(self.root).name)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Iterator over direct child node ids
pub(crate) struct ChildIds<'d> {
    doc: &'d Document,
    next: Option<NodeId>,
}

impl Iterator for ChildIds<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over descendant node ids, depth-first
pub(crate) struct DescendantIds<'d> {
    doc: &'d Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIds<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        // Push children in reverse so the first child is visited first
        let mut child_id = self.doc.node(current).last_child;
        while let Some(id) = child_id {
            self.stack.push(id);
            child_id = self.doc.node(id).prev_sibling;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    #[test]
    fn test_create() {
        let doc = Document::create("foo").expect("create");
        assert_eq!(doc.root().name(&doc), "foo");
        assert!(!doc.root().has_children(&doc));
    }

    #[test]
    fn test_create_invalid_name() {
        assert!(matches!(
            Document::create(""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Document::create("two words"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_simple() {
        let doc = Document::parse("<root>hello</root>").expect("parse");
        assert_eq!(doc.root().name(&doc), "root");
        assert_eq!(doc.root().value(&doc), "hello");
    }

    #[test]
    fn test_parse_nested() {
        let doc = Document::parse("<a><b><c/></b></a>").expect("parse");
        let b = doc.root().require_child(&doc, "b").expect("b");
        assert!(b.has_child(&doc, "c"));
        assert_eq!(doc.descendant_ids(doc.root).count(), 2);
    }

    #[test]
    fn test_parse_attributes_and_entities() {
        let doc = Document::parse(r#"<a title="x &amp; y">1 &lt; 2</a>"#).expect("parse");
        assert_eq!(doc.root().attribute(&doc, "title"), "x & y");
        assert_eq!(doc.root().value(&doc), "1 < 2");
    }

    #[test]
    fn test_parse_cdata_value() {
        let doc = Document::parse("<a>one<![CDATA[ <raw> ]]>two</a>").expect("parse");
        assert_eq!(doc.root().value(&doc), "one <raw> two");
    }

    #[test]
    fn test_parse_declaration_and_whitespace() {
        let doc = Document::parse("<?xml version=\"1.0\"?>\n<root>\n  <a/>\n</root>\n")
            .expect("parse");
        assert_eq!(doc.root().name(&doc), "root");
        assert!(doc.root().has_child(&doc, "a"));
    }

    #[test]
    fn test_parse_no_root() {
        let err = Document::parse("").expect_err("no root");
        assert!(matches!(err, Error::Malformed(_)));
        let err = Document::parse("<!-- only a comment -->").expect_err("no root");
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_parse_multiple_roots() {
        let err = Document::parse("<a/><b/>").expect_err("two roots");
        assert!(matches!(err, Error::Malformed(message) if message.contains("multiple root")));
    }

    #[test]
    fn test_parse_top_level_text() {
        let err = Document::parse("<a/>stray").expect_err("stray text");
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_parse_unclosed_tag() {
        // Either the reader or the tree builder flags this, depending on
        // which check fires first
        let err = Document::parse("<a><b></b>").expect_err("unclosed");
        assert!(matches!(err, Error::Parse(_) | Error::Malformed(_)));
    }

    #[test]
    fn test_parse_mismatched_tags() {
        // Either the reader or the tree builder flags this, depending on
        // which check fires first
        let err = Document::parse("<a><b></a></b>").expect_err("mismatch");
        assert!(matches!(err, Error::Parse(_) | Error::Malformed(_)));
    }

    #[test]
    fn test_serialize_compact() {
        let mut doc = Document::create("foo").expect("create");
        let root = doc.root();
        let bar = root.add_child(&mut doc, "bar").expect("add");
        bar.set_attribute(&mut doc, "baz", "qux").expect("attr");

        assert_eq!(
            doc.to_xml(false).expect("serialize"),
            r#"<?xml version="1.0" encoding="UTF-8"?><foo><bar baz="qux"/></foo>"#
        );
    }

    #[test]
    fn test_serialize_escapes_content() {
        let mut doc = Document::create("a").expect("create");
        doc.root().set_value(&mut doc, "1 < 2 & 3");
        let xml = doc.to_xml(false).expect("serialize");
        assert!(xml.contains("1 &lt; 2 &amp; 3"));

        let reparsed = Document::parse(&xml).expect("reparse");
        assert_eq!(reparsed.root().value(&reparsed), "1 < 2 & 3");
    }

    #[test]
    fn test_serialize_pretty() {
        let mut doc = Document::create("foo").expect("create");
        let root = doc.root();
        root.add_child(&mut doc, "bar").expect("add");

        let xml = doc.to_xml(true).expect("serialize");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("\n  <bar"));
        assert!(xml.ends_with(LINE_ENDING));
    }

    #[test]
    fn test_pretty_round_trip() {
        let doc = Document::parse("<foo><bar baz=\"qux\"/><baz/></foo>").expect("parse");
        let pretty = doc.to_xml(true).expect("pretty");
        let reparsed = Document::parse(&pretty).expect("reparse");
        assert!(reparsed.root().has_child(&reparsed, "bar"));
        assert!(reparsed.root().has_child(&reparsed, "baz"));
    }

    #[test]
    fn test_round_trip_structural_equality() {
        let sources = [
            "<foo><bar baz=\"true\"/><bar baz=\"false\"/></foo>",
            "<a>1 &lt; 2 &amp; x</a>",
            "<a>one<![CDATA[x < y]]>two<b/>three</a>",
            "<r>\n  <a/>\n  <b>text</b>\n</r>",
        ];
        for source in sources {
            let first = Document::parse(source).expect("parse");
            let compact = first.to_xml(false).expect("serialize");
            let second = Document::parse(&compact).expect("reparse");
            assert_eq!(first, second, "round trip changed structure of {}", source);
        }
    }

    #[test]
    fn test_comment_round_trip() {
        let doc = Document::parse("<!-- top --><a><!-- inner --><b/></a>").expect("parse");
        let xml = doc.to_xml(false).expect("serialize");
        assert!(xml.contains("<!-- top -->"));
        assert!(xml.contains("<!-- inner -->"));
        assert_eq!(doc, Document::parse(&xml).expect("reparse"));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = Document::create("foo").expect("create");
        original.root().set_value(&mut original, "before");

        let mut copy = original.clone();
        copy.root().set_value(&mut copy, "after");

        assert_eq!(original.root().value(&original), "before");
        assert_eq!(copy.root().value(&copy), "after");

        original.root().set_value(&mut original, "changed");
        assert_eq!(copy.root().value(&copy), "after");
    }

    #[test]
    fn test_document_equality() {
        let a = Document::create("foo").expect("create");
        let b = Document::create("foo").expect("create");
        let c = Document::create("bar").expect("create");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_document_equality_ignores_attribute_order() {
        let a = Document::parse(r#"<a x="1" y="2"/>"#).expect("parse");
        let b = Document::parse(r#"<a y="2" x="1"/>"#).expect("parse");
        assert_eq!(a, b);
    }

    #[test]
    fn test_document_hash_consistent_with_equality() {
        let a = Document::parse(r#"<a x="1" y="2"/>"#).expect("parse");
        let b = Document::parse(r#"<a y="2" x="1"/>"#).expect("parse");

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn test_query_document_order() {
        let doc =
            Document::parse(r#"<foo><bar baz="true"/><bar baz="false"/></foo>"#).expect("parse");
        let flags: Vec<String> = doc
            .query("//bar")
            .expect("compile")
            .map(|e| e.attribute(&doc, "baz").to_string())
            .collect();
        assert_eq!(flags, ["true", "false"]);
    }

    #[test]
    fn test_query_after_mutation() {
        let mut doc = Document::create("foo").expect("create");
        let root = doc.root();
        let first = root.add_child(&mut doc, "baz").expect("add");
        first.set_attribute(&mut doc, "qux", "true").expect("attr");
        let second = root.add_child(&mut doc, "baz").expect("add");
        second.set_attribute(&mut doc, "qux", "false").expect("attr");

        let hits: Vec<Element> = doc
            .query("/foo/baz[@qux='false']")
            .expect("compile")
            .collect();
        assert_eq!(hits, [second]);
    }

    #[test]
    fn test_query_compile_error() {
        let doc = Document::create("foo").expect("create");
        assert!(matches!(doc.query(""), Err(Error::QueryCompile(_))));
        assert!(matches!(doc.query("//foo!"), Err(Error::QueryCompile(_))));
    }

    #[test]
    fn test_query_cache_reuse() {
        let mut doc = Document::create("foo").expect("create");
        doc.root().add_child(&mut doc, "bar").expect("add");

        // Same expression twice: the second run hits the cache and must
        // see the same results
        assert_eq!(doc.query("//bar").expect("compile").count(), 1);
        doc.root().add_child(&mut doc, "bar").expect("add");
        assert_eq!(doc.query("//bar").expect("compile").count(), 2);
    }

    #[test]
    fn test_unlink_relinks_siblings() {
        let mut doc = Document::parse("<r><a/><b/><c/></r>").expect("parse");
        let b = doc
            .child_ids(doc.root)
            .find(|&id| doc.node_name(id) == Some("b"))
            .expect("b exists");
        doc.unlink(b);

        let names: Vec<String> = doc
            .root()
            .child_nodes(&doc)
            .filter_map(|id| doc.node_name(id).map(str::to_string))
            .collect();
        assert_eq!(names, ["a", "c"]);
    }
}
