use unicode_width::UnicodeWidthStr;

/// Collects the rows of one `table` node and renders them as a reST grid
/// table.
///
/// The first row is styled as the header: the separator below it uses `=`.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    pub fn new() -> TableBuilder {
        TableBuilder::default()
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// The row cells are currently appended to, if any row was started.
    pub fn current_row(&mut self) -> Option<&mut Vec<String>> {
        self.rows.last_mut()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Display width of every column: the widest cell in that column over
    /// all rows, header included, and never less than one.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![1; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        if widths.is_empty() {
            return String::new();
        }
        let separator = |fill: &str| {
            let parts: Vec<String> = widths.iter().map(|w| fill.repeat(*w)).collect();
            format!("+{}+", parts.join("+"))
        };
        let row_separator = separator("-");
        let header_separator = separator("=");

        let mut lines = Vec::with_capacity(self.rows.len() * 2 + 1);
        for (no, row) in self.rows.iter().enumerate() {
            if no == 1 {
                lines.push(header_separator.clone());
            } else {
                lines.push(row_separator.clone());
            }
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or_default();
                    format!("{}{}", cell, " ".repeat(width - cell.width()))
                })
                .collect();
            lines.push(format!("|{}|", cells.join("|")));
        }
        lines.push(row_separator);
        lines.join("\n")
    }
}
