//! XML node representation
//!
//! Nodes live in the owning document's arena and are addressed by
//! NodeId (u32) indices for compact, cache-friendly references.

/// Compact node identifier (index into the owning document's arena)
pub type NodeId = u32;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
    /// CDATA section
    CData,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
}

/// An XML node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for the document root or detached nodes)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Tag name (elements) or target plus data (processing instructions)
    pub name: String,
    /// Text content (text, CDATA and comment nodes)
    pub text: String,
    /// Attributes in insertion order (elements only)
    pub attributes: Vec<XmlAttribute>,
}

impl XmlNode {
    /// Create the document root node
    pub fn document() -> Self {
        XmlNode {
            kind: NodeKind::Document,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            text: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a new element node
    pub fn element(name: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::Element,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name,
            text: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a new text node
    pub fn text(content: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::Text,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            text: content,
            attributes: Vec::new(),
        }
    }

    /// Create a new CDATA node
    pub fn cdata(content: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::CData,
            text: content,
            ..XmlNode::text(String::new(), parent)
        }
    }

    /// Create a new comment node
    pub fn comment(content: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::Comment,
            text: content,
            ..XmlNode::text(String::new(), parent)
        }
    }

    /// Create a processing instruction node
    pub fn processing_instruction(content: String, parent: Option<NodeId>) -> Self {
        XmlNode {
            kind: NodeKind::ProcessingInstruction,
            name: content,
            ..XmlNode::text(String::new(), parent)
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this node carries textual value content (text or CDATA)
    #[inline]
    pub fn is_textual(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::CData)
    }
}

/// Stored attribute
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: String,
}

impl XmlAttribute {
    pub fn new(name: String, value: String) -> Self {
        XmlAttribute { name, value }
    }
}
