use crate::logging::logger::DebugLogsCategories;
use crate::tree::NodeKind;

/// Knobs that control how a document tree is rendered.
///
/// All fields have sensible defaults via [`Default`]; start there and only
/// override what you need.
///
/// # Examples
///
/// ```rust
/// use html2rest::EmitOptions;
///
/// let mut opts = EmitOptions::default();
/// opts.typeface_max_len = 80;
/// opts.image_link_prefixes.push(String::from("http://assets.example.com/"));
/// ```
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Which `eprintln!` trace categories fire while rendering.  Only honoured
    /// in debug builds.
    pub debug_categories: DebugLogsCategories,
    /// Bold / italic / teletype spans whose stripped text is longer than this
    /// many characters are emitted without markup.
    pub typeface_max_len: usize,
    /// Links nested anywhere below a node of one of these kinds are written as
    /// named references with a separate `.. _text: url` target, because inline
    /// hyperlinks are unreliable inside grid-table cells.
    pub substitution_kinds: Vec<NodeKind>,
    /// URL prefixes of asset hosts whose anchors wrap a single image.  Such an
    /// anchor renders as its first child image instead of a hyperlink.
    pub image_link_prefixes: Vec<String>,
    /// The URL the page was fetched from.  When set, the HTML front-end
    /// resolves relative `href` / `src` attributes against it (and against a
    /// `<base href>` if the page has one).
    pub document_uri: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> EmitOptions {
        EmitOptions {
            debug_categories: DebugLogsCategories::NONE,
            typeface_max_len: 50,
            substitution_kinds: vec![NodeKind::TableHeader, NodeKind::TableData],
            image_link_prefixes: vec![],
            document_uri: None,
        }
    }
}
