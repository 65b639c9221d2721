use std::collections::HashMap;
use std::fmt;

/// Index of a node inside a [`DocumentTree`].
///
/// Ids are only meaningful for the tree that minted them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of node kinds the emitter knows how to render.
///
/// Elements without a dedicated renderer are kept as [`NodeKind::Other`]
/// with their tag name; their children are passed through unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Text,
    Paragraph,
    Heading,
    Bold,
    Italic,
    Teletype,
    Code,
    Link,
    Image,
    HorizontalRule,
    LineBreak,
    UnorderedList,
    OrderedList,
    ListItem,
    Table,
    TableRow,
    TableHeader,
    TableData,
    PreBlock,
    PreInline,
    Other(String),
}

impl NodeKind {
    /// Map an HTML tag name onto a kind.  `pre` maps to [`NodeKind::PreBlock`];
    /// the front-end downgrades it to [`NodeKind::PreInline`] when it sits in
    /// phrasing content.
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            "p" => NodeKind::Paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => NodeKind::Heading,
            "strong" | "b" | "big" => NodeKind::Bold,
            "i" | "em" => NodeKind::Italic,
            "tt" => NodeKind::Teletype,
            "code" => NodeKind::Code,
            "a" => NodeKind::Link,
            "img" => NodeKind::Image,
            "hr" => NodeKind::HorizontalRule,
            "br" => NodeKind::LineBreak,
            "ul" => NodeKind::UnorderedList,
            "ol" => NodeKind::OrderedList,
            "li" => NodeKind::ListItem,
            "table" => NodeKind::Table,
            "tr" => NodeKind::TableRow,
            "th" => NodeKind::TableHeader,
            "td" => NodeKind::TableData,
            "pre" => NodeKind::PreBlock,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, NodeKind::UnorderedList | NodeKind::OrderedList)
    }
}

/// One element or text run of a [`DocumentTree`].
#[derive(Clone, Debug, PartialEq)]
pub struct DocNode {
    pub kind: NodeKind,
    /// Literal text; only populated for text and `pre` nodes.
    pub content: String,
    pub attributes: HashMap<String, String>,
    /// Heading level, or list nesting depth for lists and list items.
    pub level: usize,
    pub children: Vec<NodeId>,
    /// `None` for the root only.
    pub parent: Option<NodeId>,
}

impl DocNode {
    pub fn new(kind: NodeKind) -> DocNode {
        DocNode {
            kind,
            content: String::new(),
            attributes: HashMap::new(),
            level: 0,
            children: vec![],
            parent: None,
        }
    }

    pub fn text(content: &str) -> DocNode {
        DocNode {
            content: content.to_string(),
            ..DocNode::new(NodeKind::Text)
        }
    }

    pub fn with_level(mut self, level: usize) -> DocNode {
        self.level = level;
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> DocNode {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> DocNode {
        self.content = content.to_string();
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// An arena-owned document tree.
///
/// The tree owns every node; parent links are plain [`NodeId`]s used for
/// upward lookups only.  Node `0` is always the [`NodeKind::Document`] root.
///
/// # Examples
///
/// ```rust
/// use html2rest::{DocNode, DocumentTree, NodeKind};
///
/// let mut tree = DocumentTree::new();
/// let p = tree.append(tree.root(), DocNode::new(NodeKind::Paragraph));
/// tree.append(p, DocNode::text("hello"));
/// assert_eq!(tree.ancestors(p).count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentTree {
    nodes: Vec<DocNode>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        DocumentTree::new()
    }
}

impl DocumentTree {
    pub fn new() -> DocumentTree {
        DocumentTree {
            nodes: vec![DocNode::new(NodeKind::Document)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Attach `node` as the last child of `parent` and return its id.
    ///
    /// Panics if `parent` was not minted by this tree.
    pub fn append(&mut self, parent: NodeId, mut node: DocNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes[parent.0].children.push(id);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&DocNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DocNode> {
        self.nodes.get_mut(id.0)
    }

    /// Walk the parent chain of `id`, nearest ancestor first, ending with
    /// the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        let next = self.get(id).and_then(|n| n.parent);
        Ancestors { tree: self, next }
    }
}

pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a DocNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some((id, node))
    }
}
