use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::EmitOptions;
use crate::parser::NodeRef;
use crate::tree::{DocNode, DocumentTree, NodeId, NodeKind};
use crate::utils::*;

/// DOM-navigation helpers implemented on [`NodeRef`].
pub trait NodeExt {
    /// Return the local tag name of this node if it is an element (e.g.
    /// `"div"`, `"p"`), or `None` for text / comment / document nodes.
    fn element_name(&self) -> Option<&str>;

    /// Look up an attribute by name and return its value, or `None` if the
    /// attribute is absent or this is not an element node.
    fn attr_value(&self, name: &str) -> Option<String>;

    /// All attributes of an element as `(name, value)` pairs, in document
    /// order.  Empty for non-element nodes.
    fn attr_pairs(&self) -> Vec<(String, String)>;
}

impl NodeExt for NodeRef {
    fn element_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.local.as_ref())
    }

    fn attr_value(&self, name: &str) -> Option<String> {
        self.as_element()
            .and_then(|e| e.attributes.borrow().get(name).map(|v| v.to_string()))
    }

    fn attr_pairs(&self) -> Vec<(String, String)> {
        match self.as_element() {
            Some(e) => e
                .attributes
                .borrow()
                .map
                .iter()
                .map(|(name, attr)| (name.local.to_string(), attr.value.clone()))
                .collect(),
            None => vec![],
        }
    }
}

const URL_ATTRIBUTES: &[&str] = &["href", "src"];

fn is_inline_content(node: &NodeRef) -> bool {
    node.as_text().is_some()
        || node
            .element_name()
            .is_some_and(|tag| PHRASING_ELEMENTS.contains(tag.to_lowercase().as_str()))
}

/// Whitespace next to inline content is a word separator, whatever the parent.
fn separates_inline_content(text: &NodeRef) -> bool {
    text.previous_sibling().is_some_and(|n| is_inline_content(&n))
        || text.next_sibling().is_some_and(|n| is_inline_content(&n))
}

struct TreeBuilder<'a> {
    tree: DocumentTree,
    options: &'a EmitOptions,
    base_path: String,
}

impl TreeBuilder<'_> {
    fn add_children(&mut self, dom: &NodeRef, parent: NodeId, list_depth: usize, in_phrasing: bool) {
        let parent_tag = dom.element_name().unwrap_or_default().to_string();
        for child in dom.children() {
            if let Some(text) = child.as_text() {
                let text = normalize_text(&text.borrow());
                if text.trim().is_empty()
                    && !(in_phrasing
                        || WHITESPACE_KEEPING_ELEMENTS.contains(parent_tag.as_str())
                        || separates_inline_content(&child))
                {
                    continue;
                }
                self.tree.append(parent, DocNode::text(&text));
            } else if let Some(tag) = child.element_name() {
                let tag = tag.to_lowercase();
                if SKIPPED_ELEMENTS.contains(tag.as_str()) {
                    d!({
                        if self.options.debug_categories.contains(DebugLogsCategories::TREE_BUILDING) {
                            eprintln!("tree: dropping <{}>", tag);
                        }
                    });
                    continue;
                }
                self.add_element(&child, &tag, parent, list_depth, in_phrasing);
            }
        }
    }

    fn add_element(&mut self, dom: &NodeRef, tag: &str, parent: NodeId, list_depth: usize, in_phrasing: bool) {
        let kind = match NodeKind::from_tag(tag) {
            NodeKind::PreBlock if in_phrasing => NodeKind::PreInline,
            kind => kind,
        };
        let list_depth = if kind.is_list() { list_depth + 1 } else { list_depth };
        let level = match kind {
            NodeKind::Heading => tag[1..].parse().unwrap_or(1),
            NodeKind::UnorderedList | NodeKind::OrderedList | NodeKind::ListItem => list_depth,
            _ => 0,
        };

        let mut node = DocNode::new(kind.clone()).with_level(level);
        for (name, value) in dom.attr_pairs() {
            let value = match self.options.document_uri.as_deref() {
                Some(doc_uri) if URL_ATTRIBUTES.contains(&name.as_str()) => {
                    to_absolute_uri(&value, doc_uri, &self.base_path)
                }
                _ => value,
            };
            node.attributes.insert(name, value);
        }

        if matches!(kind, NodeKind::PreBlock | NodeKind::PreInline) {
            node.content = dom.text_contents();
            self.tree.append(parent, node);
            return;
        }

        let id = self.tree.append(parent, node);
        let in_phrasing = in_phrasing || tag == "p" || PHRASING_ELEMENTS.contains(tag);
        self.add_children(dom, id, list_depth, in_phrasing);
    }
}

/// Convert a parsed HTML document into a [`DocumentTree`].
///
/// The children of `<body>` become the direct children of the tree's root.
/// Head content, scripts, styles and comments are dropped; text runs are
/// whitespace-collapsed except inside `pre`.  When
/// [`EmitOptions::document_uri`] is set, `href` and `src` attributes are made
/// absolute.
///
/// # Examples
///
/// ```rust
/// use html2rest::parser::{build_tree, parse_html};
/// use html2rest::{EmitOptions, NodeKind};
///
/// let dom = parse_html("<h2>Title</h2><p>Body</p>");
/// let tree = build_tree(&dom, &EmitOptions::default());
/// let root = tree.get(tree.root()).unwrap();
/// let first = tree.get(root.children[0]).unwrap();
/// assert_eq!(first.kind, NodeKind::Heading);
/// assert_eq!(first.level, 2);
/// ```
pub fn build_tree(dom: &NodeRef, options: &EmitOptions) -> DocumentTree {
    build_tree_with_logger(dom, options, &PerfLogger::new(vec![]))
}

pub(crate) fn build_tree_with_logger(dom: &NodeRef, options: &EmitOptions, logger: &PerfLogger) -> DocumentTree {
    start_span!(logger, BUILD_TREE);
    let base_path = dom
        .select_first("base")
        .ok()
        .and_then(|base| base.as_node().attr_value("href"))
        .unwrap_or_default();
    let mut builder = TreeBuilder {
        tree: DocumentTree::new(),
        options,
        base_path,
    };
    let body = match dom.select_first("body") {
        Ok(body) => body.as_node().clone(),
        Err(_) => dom.clone(),
    };
    let root = builder.tree.root();
    builder.add_children(&body, root, 0, false);
    add_point_to_span!(logger, BUILD_TREE, format!("{} nodes", builder.tree.len()));
    end_span!(logger, BUILD_TREE);
    builder.tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;

    fn tree_of(html: &str) -> DocumentTree {
        build_tree(&parse_html(html), &EmitOptions::default())
    }

    fn kinds_under(tree: &DocumentTree, id: NodeId) -> Vec<NodeKind> {
        tree.get(id)
            .unwrap()
            .children
            .iter()
            .map(|c| tree.get(*c).unwrap().kind.clone())
            .collect()
    }

    #[test]
    fn body_children_become_root_children() {
        let tree = tree_of("<html><head><title>x</title></head><body><p>a</p>\n<hr></body></html>");
        assert_eq!(
            kinds_under(&tree, tree.root()),
            vec![NodeKind::Paragraph, NodeKind::HorizontalRule]
        );
    }

    #[test]
    fn list_levels_follow_nesting() {
        let tree = tree_of("<ul><li>a<ol><li>b</li></ol></li></ul>");
        let ul = tree.get(tree.root()).unwrap().children[0];
        let li = tree.get(ul).unwrap().children[0];
        let ol = tree.get(li).unwrap().children[1];
        let inner_li = tree.get(ol).unwrap().children[0];
        assert_eq!(tree.get(ul).unwrap().level, 1);
        assert_eq!(tree.get(li).unwrap().level, 1);
        assert_eq!(tree.get(ol).unwrap().level, 2);
        assert_eq!(tree.get(inner_li).unwrap().level, 2);
    }

    #[test]
    fn pre_keeps_raw_text_and_becomes_inline_in_phrasing_content() {
        let tree = tree_of("<pre>a\n  <b>b</b></pre><div><span><pre>y</pre></span></div>");
        let root = tree.get(tree.root()).unwrap();
        let pre = tree.get(root.children[0]).unwrap();
        assert_eq!(pre.kind, NodeKind::PreBlock);
        assert_eq!(pre.content, "a\n  b");
        assert!(pre.children.is_empty());

        let div = root.children[1];
        let span = tree.get(div).unwrap().children[0];
        assert_eq!(kinds_under(&tree, span), vec![NodeKind::PreInline]);
    }

    #[test]
    fn whitespace_between_blocks_is_dropped_but_kept_between_inlines() {
        let tree = tree_of("<div>\n  <p><b>a</b> <i>b</i></p>\n</div>");
        let div = tree.get(tree.root()).unwrap().children[0];
        assert_eq!(kinds_under(&tree, div), vec![NodeKind::Paragraph]);
        let p = tree.get(div).unwrap().children[0];
        assert_eq!(
            kinds_under(&tree, p),
            vec![NodeKind::Bold, NodeKind::Text, NodeKind::Italic]
        );
    }

    #[test]
    fn whitespace_between_inline_siblings_of_a_block_is_kept() {
        let tree = tree_of("<div><span>Hello</span> <span>world</span></div>\n<section>\n<em>a</em>\n</section>");
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(
            kinds_under(&tree, root.children[0]),
            vec![NodeKind::Other("span".to_string()), NodeKind::Text, NodeKind::Other("span".to_string())]
        );
        assert_eq!(
            kinds_under(&tree, root.children[1]),
            vec![NodeKind::Text, NodeKind::Italic, NodeKind::Text]
        );
        assert_eq!(crate::html_to_rest("<div><span>Hello</span> <span>world</span></div>", EmitOptions::default()).unwrap(), "Hello world");
    }

    #[test]
    fn urls_are_resolved_against_document_uri_and_base() {
        let mut options = EmitOptions::default();
        options.document_uri = Some("http://fakehost/test/page.html".to_string());
        let dom = parse_html(
            "<html><head><base href=\"/media/\"></head><body><img src=\"a.png\" alt=\"A\"></body></html>",
        );
        let tree = build_tree(&dom, &options);
        let img = tree.get(tree.get(tree.root()).unwrap().children[0]).unwrap();
        assert_eq!(img.attr("src"), Some("http://fakehost/media/a.png"));
        assert_eq!(img.attr("alt"), Some("A"));
    }
}
