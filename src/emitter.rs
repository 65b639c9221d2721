mod block;
mod inline;
pub mod substitution;
pub mod table;

use crate::error::{EmitError, Result};
use crate::logging::PerfConsoleListener;
use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::EmitOptions;
use crate::tree::{DocNode, DocumentTree, NodeId, NodeKind};
use std::rc::Rc;
use substitution::{SubstitutionKind, SubstitutionRegistry};
use table::TableBuilder;

pub use inline::{apply_typeface, Typeface};

/// The literal reST transition line written for `hr`.
pub(crate) const HORIZONTAL_RULE: &str = "----";

pub(crate) fn create_perf_logger() -> PerfLogger {
    let listeners = vec![Listener::new(Rc::new(PerfConsoleListener::from_env()))];
    PerfLogger::new(listeners)
}

/// Renders one [`DocumentTree`] as reStructuredText.
///
/// All state that lives across the traversal (substitution registries, the
/// pending definition lines, the current list marker and the table being
/// built) belongs to the emitter.  [`Emitter::emit`] consumes it, so every
/// document gets a fresh one.
pub struct Emitter<'a> {
    tree: &'a DocumentTree,
    options: EmitOptions,
    logger: &'a PerfLogger,
    links: SubstitutionRegistry,
    images: SubstitutionRegistry,
    /// Definition lines waiting for the next top-level block boundary.
    pending: Vec<String>,
    list_marker: &'static str,
    table: Option<TableBuilder>,
}

impl<'a> Emitter<'a> {
    pub fn new(tree: &'a DocumentTree, options: EmitOptions, logger: &'a PerfLogger) -> Emitter<'a> {
        Emitter {
            tree,
            options,
            logger,
            links: SubstitutionRegistry::new(SubstitutionKind::Link),
            images: SubstitutionRegistry::new(SubstitutionKind::Image),
            pending: vec![],
            list_marker: "",
            table: None,
        }
    }

    /// Render the whole tree.  Trailing whitespace is trimmed.
    pub fn emit(mut self) -> Result<String> {
        let logger = self.logger;
        start_span!(logger, EMIT);
        let root = self.tree.root();
        let result = self.emit_node(root)?;
        annotate_span!(logger, EMIT, format!("{} link targets, {} images", self.links.len(), self.images.len()));
        end_span!(logger, EMIT);
        Ok(result.trim_end().to_string())
    }

    fn node(&self, id: NodeId) -> Result<&'a DocNode> {
        self.tree.get(id).ok_or(EmitError::UnknownNode(id))
    }

    fn emit_node(&mut self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        let mut result = String::new();
        if !self.pending.is_empty() && node.parent == Some(self.tree.root()) {
            result.push_str(&self.take_pending());
            result.push_str("\n\n");
        }
        result.push_str(&self.render(id, node)?);
        Ok(result)
    }

    fn render(&mut self, id: NodeId, node: &'a DocNode) -> Result<String> {
        match &node.kind {
            NodeKind::Document => self.document(id),
            NodeKind::Text => Ok(node.content.clone()),
            NodeKind::Paragraph => self.paragraph(id),
            NodeKind::Heading => self.heading(id, node),
            NodeKind::Bold => self.typeface(id, Typeface::Bold),
            NodeKind::Italic => self.typeface(id, Typeface::Italic),
            NodeKind::Teletype => self.typeface(id, Typeface::Teletype),
            NodeKind::Code => self.code(id),
            NodeKind::Link => self.link(id, node),
            NodeKind::Image => Ok(self.image(node)),
            NodeKind::HorizontalRule => Ok(format!("{}\n\n", HORIZONTAL_RULE)),
            NodeKind::LineBreak => Ok("\n".to_string()),
            NodeKind::UnorderedList => self.list(id, node, "*"),
            NodeKind::OrderedList => self.list(id, node, "#."),
            NodeKind::ListItem => self.list_item(id, node),
            NodeKind::Table => self.table(id),
            NodeKind::TableRow => self.table_row(id),
            NodeKind::TableHeader | NodeKind::TableData => self.table_cell(id),
            NodeKind::PreBlock => Ok(self.pre_block(node)),
            NodeKind::PreInline => Ok(self.pre_inline(node)),
            NodeKind::Other(tag) => {
                d!({
                    if self.options.debug_categories.contains(DebugLogsCategories::UNKNOWN_NODES) {
                        eprintln!("emit: passing through <{}> {}", tag, id);
                    }
                });
                self.emit_children(id)
            }
        }
    }

    fn emit_children(&mut self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        let mut out = String::new();
        for child in &node.children {
            out.push_str(&self.emit_node(*child)?);
        }
        Ok(out)
    }

    /// Drain the pending definition lines, one per line.
    fn take_pending(&mut self) -> String {
        let logger = self.logger;
        start_span!(logger, FLUSH_SUBSTITUTIONS);
        add_point_to_span!(logger, FLUSH_SUBSTITUTIONS, format!("{} definitions", self.pending.len()));
        let block = self.pending.join("\n");
        self.pending.clear();
        end_span!(logger, FLUSH_SUBSTITUTIONS);
        block
    }

    fn document(&mut self, id: NodeId) -> Result<String> {
        let mut result = self.emit_children(id)?;
        if !self.pending.is_empty() {
            result.push_str(&self.take_pending());
            result.push_str("\n\n");
        }
        let logger = self.logger;
        start_span!(logger, NORMALIZE_OUTPUT);
        let result = normalize_output(&result);
        end_span!(logger, NORMALIZE_OUTPUT);
        Ok(result)
    }
}

/// Drop a lone space at the start of a line.  Deeper indentation (nested
/// list items, literal blocks) is left alone.
fn drop_single_space_indents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\n' {
            let mut ahead = chars.clone();
            if ahead.next() == Some(' ') && ahead.peek() != Some(&' ') {
                chars.next();
            }
        }
    }
    out
}

/// Whole-document cleanup applied once all fragments are assembled:
/// a single space right after a line break is dropped, bold markup running
/// into a grid-table border gets a blank line, and a transition on the last
/// line is cut (reST documents may not end with one).
pub fn normalize_output(text: &str) -> String {
    let text = drop_single_space_indents(text).replace("**+--", "**\n\n+--");
    let trimmed = text.trim_end();
    let last_line = trimmed.rsplit('\n').next().unwrap_or_default();
    if last_line == HORIZONTAL_RULE {
        return trimmed[..trimmed.len() - HORIZONTAL_RULE.len()].to_string();
    }
    text
}
