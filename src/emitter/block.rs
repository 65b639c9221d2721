use super::table::TableBuilder;
use super::Emitter;
use crate::error::{EmitError, Result};
use crate::logging::logger::DebugLogsCategories;
use crate::logging::logging_defs::*;
use crate::tree::{DocNode, NodeId};
use crate::utils::{normalize_text, unescape_html_entities};
use unicode_width::UnicodeWidthStr;

/// Adornment character per heading level 1..=6, and whether the title also
/// gets an overline.
const HEADLINE_DATA: [(char, bool); 6] = [
    ('=', true),
    ('-', true),
    ('=', false),
    ('-', false),
    ('`', false),
    ('\'', false),
];

const INDENT: &str = "    ";

/// Title adornment for a heading `level`; levels past 6 use level 6.
pub(crate) fn heading_adornment(level: usize) -> (char, bool) {
    HEADLINE_DATA[level.clamp(1, HEADLINE_DATA.len()) - 1]
}

impl<'a> Emitter<'a> {
    pub(super) fn paragraph(&mut self, id: NodeId) -> Result<String> {
        Ok(format!("\n{}\n\n", self.emit_children(id)?.trim()))
    }

    pub(super) fn heading(&mut self, id: NodeId, node: &DocNode) -> Result<String> {
        let text = self.emit_children(id)?;
        let text = text.trim_start();
        let (adornment, overline) = heading_adornment(node.level);
        let markup = adornment.to_string().repeat(text.width());
        if overline {
            Ok(format!("{}\n{}\n{}\n\n", markup, text, markup))
        } else {
            Ok(format!("{}\n{}\n\n", text, markup))
        }
    }

    /// A literal block: `::`, a blank line, then the decoded content indented
    /// by four spaces.
    pub(super) fn pre_block(&self, node: &DocNode) -> String {
        let content = unescape_html_entities(&node.content);
        let indented: Vec<String> = content
            .trim()
            .lines()
            .map(|line| format!("{}{}", INDENT, line))
            .collect();
        format!("::\n\n{}\n\n", indented.join("\n"))
    }

    /// reST has no inline literal that survives arbitrary content, so inline
    /// `pre` keeps its HTML tags.
    pub(super) fn pre_inline(&self, node: &DocNode) -> String {
        format!("<pre>{}</pre>", unescape_html_entities(&node.content))
    }

    pub(super) fn list(&mut self, id: NodeId, node: &DocNode, marker: &'static str) -> Result<String> {
        let logger = self.logger;
        if node.level == 1 {
            start_span!(logger, RENDER_LIST);
        }
        let enclosing = std::mem::replace(&mut self.list_marker, marker);
        let content = self.emit_children(id);
        self.list_marker = enclosing;
        let content = content?;

        if node.level != 1 {
            return Ok(content);
        }
        // Top-level lists put a blank line between every line so each item
        // (and each nested item) starts a new block.
        let items: Vec<&str> = content.split('\n').filter(|line| !line.is_empty()).collect();
        d!({
            if self.options.debug_categories.contains(DebugLogsCategories::LISTS) {
                eprintln!("list: {} with {} lines", id, items.len());
            }
        });
        end_span!(logger, RENDER_LIST);
        Ok(format!("{}\n\n", items.join("\n\n")))
    }

    pub(super) fn list_item(&mut self, id: NodeId, node: &DocNode) -> Result<String> {
        let content = self.emit_children(id)?;
        Ok(format!(
            "\n{}{} {}\n",
            INDENT.repeat(node.level.saturating_sub(1)),
            self.list_marker,
            content.trim_matches('\n')
        ))
    }

    /// Render a `table` through a fresh [`TableBuilder`].  The text its
    /// children render is discarded; rows and cells feed the builder.
    pub(super) fn table(&mut self, id: NodeId) -> Result<String> {
        let logger = self.logger;
        start_span!(logger, RENDER_TABLE);
        let enclosing = self.table.replace(TableBuilder::new());
        let children = self.emit_children(id);
        let builder = std::mem::replace(&mut self.table, enclosing);
        children?;

        let builder = builder.unwrap_or_default();
        add_point_to_span!(logger, RENDER_TABLE, format!("{} rows", builder.row_count()));
        d!({
            if self.options.debug_categories.contains(DebugLogsCategories::TABLES) {
                eprintln!("table: {} rows, widths {:?}", builder.row_count(), builder.column_widths());
            }
        });
        let content = builder.render();
        end_span!(logger, RENDER_TABLE);
        Ok(format!("\n\n{}\n\n", content))
    }

    pub(super) fn table_row(&mut self, id: NodeId) -> Result<String> {
        self.table
            .as_mut()
            .ok_or(EmitError::RowOutsideTable(id))?
            .add_row(vec![]);
        self.emit_children(id)?;
        Ok(String::new())
    }

    pub(super) fn table_cell(&mut self, id: NodeId) -> Result<String> {
        let text = self.emit_children(id)?;
        let cell = normalize_text(text.trim());
        self.table
            .as_mut()
            .and_then(TableBuilder::current_row)
            .ok_or(EmitError::CellOutsideRow(id))?
            .push(cell);
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adornment_levels_clamp_to_six() {
        assert_eq!(heading_adornment(1), ('=', true));
        assert_eq!(heading_adornment(2), ('-', true));
        assert_eq!(heading_adornment(3), ('=', false));
        assert_eq!(heading_adornment(6), ('\'', false));
        assert_eq!(heading_adornment(9), ('\'', false));
    }
}
