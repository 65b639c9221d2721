//! Render parsed HTML documents as [reStructuredText](https://docutils.sourceforge.io/rst.html).
//!
//! ## Quick start
//!
//! ```rust
//! use html2rest::{html_to_rest, EmitOptions};
//!
//! let html = "<h1>Title</h1><p>See <a href=\"https://example.com\">the docs</a>.</p>";
//! let rest = html_to_rest(html, EmitOptions::default()).unwrap();
//! assert_eq!(rest, "=====\nTitle\n=====\n\n\nSee `the docs <https://example.com>`_ .");
//! ```
//!
//! ## Module layout
//!
//! * **Top level** – [`emit`] / [`emit_with_options`] render a [`DocumentTree`];
//!   [`html_to_rest`] parses HTML first.  [`EmitOptions`] holds the knobs.
//! * [`parser`] – the HTML parser wrapper and [`parser::build_tree`], which turns
//!   a parsed DOM into the arena [`DocumentTree`] the emitter walks.
//! * [`Emitter`] – the render pass itself.  One emitter renders one document:
//!   link / image substitution names, pending definition lines, list markers
//!   and table state all live on it.
//! * [`shared_utils`] – text helpers the emitter uses that are handy on their own.

macro_rules! d {
    ($code:block) => {
        if cfg!(debug_assertions) {
            $code
        }
    };
}

#[macro_use]
mod logging;
mod emitter;
mod error;
mod models;
mod node_utils;
mod tree;
mod utils;

pub use emitter::substitution::{Resolution, SubstitutionKind, SubstitutionRegistry};
pub use emitter::table::TableBuilder;
pub use emitter::{apply_typeface, normalize_output, Emitter, Typeface};
pub use error::{EmitError, Result};
pub use logging::logger::{DebugLogsCategories, Listener, PerfListener, PerfLogger};
pub use models::EmitOptions;
pub use tree::{Ancestors, DocNode, DocumentTree, NodeId, NodeKind};

/// Text helpers shared by the front-end and the emitter.
pub mod shared_utils {
    pub use crate::utils::{file_name_of, normalize_text, to_absolute_uri, unescape_html_entities};
}

/// Thin wrappers around the underlying HTML parser.
///
/// [`NodeRef`] is the reference-counted DOM node type produced by
/// [`parse_html`]; [`build_tree`] converts it into a [`crate::DocumentTree`].
pub mod parser {
    use kuchikikiki::traits::TendrilSink;
    pub use kuchikikiki::NodeRef;
    pub use crate::node_utils::{build_tree, NodeExt};

    /// Parse an HTML string into a [`NodeRef`] document tree.
    ///
    /// The parser follows the HTML5 specification; an implicit `<html>`, `<head>`,
    /// and `<body>` are synthesised when missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use html2rest::parser::parse_html;
    ///
    /// let doc = parse_html("<div><p>hello</p></div>");
    /// assert!(doc.select_first("p").is_ok());
    /// ```
    pub fn parse_html(html: &str) -> NodeRef {
        kuchikikiki::parse_html().one(html)
    }
}

/// Render `tree` with [`EmitOptions::default()`].
pub fn emit(tree: &DocumentTree) -> Result<String> {
    emit_with_options(tree, EmitOptions::default())
}

/// Render `tree` as reStructuredText.
///
/// Rendering is deterministic: the same tree and options always give the
/// same text.  Errors only signal a malformed tree (see [`EmitError`]);
/// unknown tags, links without `href` and images without `src` degrade
/// gracefully.
///
/// # Examples
///
/// ```rust
/// use html2rest::{emit_with_options, DocNode, DocumentTree, EmitOptions, NodeKind};
///
/// let mut tree = DocumentTree::new();
/// let h = tree.append(tree.root(), DocNode::new(NodeKind::Heading).with_level(1));
/// tree.append(h, DocNode::text("Title"));
/// let rest = emit_with_options(&tree, EmitOptions::default()).unwrap();
/// assert_eq!(rest, "=====\nTitle\n=====");
/// ```
pub fn emit_with_options(tree: &DocumentTree, options: EmitOptions) -> Result<String> {
    let logger = emitter::create_perf_logger();
    Emitter::new(tree, options, &logger).emit()
}

/// Parse `html`, build its [`DocumentTree`] and render it.
pub fn html_to_rest(html: &str, options: EmitOptions) -> Result<String> {
    let logger = emitter::create_perf_logger();
    let dom = parser::parse_html(html);
    let tree = node_utils::build_tree_with_logger(&dom, &options, &logger);
    Emitter::new(&tree, options, &logger).emit()
}
