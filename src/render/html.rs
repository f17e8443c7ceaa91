//! HTML rendering of a grouping tree.

use super::Renderer;
use crate::provenance::CellRef;
use crate::tree::TreeNode;
use crate::value::CellValue;
use std::collections::HashSet;

/// Renders a grouping tree as one HTML `<table>`: a `<thead>` of column
/// names and a `<tbody>` where grouped dimensions are merged across rows
/// with `rowspan`. Each data cell that maps back to a source cell is
/// wrapped in a link carrying the datapoint identifier, for external
/// "explain this value" tooling.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    table_id: u32,
    explain_prefix: String,
    highlight: HashSet<(usize, usize)>,
}

impl HtmlRenderer {
    /// Creates a renderer for the table with the given id. The id goes into
    /// the datapoint identifiers of the explanation links.
    pub fn new(table_id: u32) -> Self {
        Self {
            table_id,
            explain_prefix: "explain".to_string(),
            highlight: HashSet::new(),
        }
    }

    /// Sets the URL prefix of the explanation links (defaults to
    /// `explain`).
    pub fn with_explain_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.explain_prefix = prefix.into();
        self
    }

    /// Marks `(row, col)` cells to be tagged with the `highlighted` CSS
    /// class.
    pub fn with_highlighted(mut self, cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.highlight.extend(cells);
        self
    }

    fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlight.contains(&(row, col))
    }
}

impl Renderer for HtmlRenderer {
    fn empty_table(&self) -> String {
        "<table border=\"1\"></table>".to_string()
    }

    fn start_structure(&mut self, out: &mut String) {
        out.push_str("<table border=\"1\">\n");
    }

    fn start_keys(&mut self, out: &mut String) {
        out.push_str("<thead>\n");
    }

    fn print_key(&mut self, out: &mut String, key: &str) {
        out.push_str("<th>");
        out.push_str(key);
        out.push_str("</th>");
    }

    fn end_keys(&mut self, out: &mut String) {
        out.push_str("\n</thead>\n");
    }

    fn start_body(&mut self, out: &mut String) {
        out.push_str("<tbody>\n");
    }

    fn start_row(&mut self, out: &mut String, _width: usize) {
        out.push_str("<tr>");
    }

    fn print_cell(
        &mut self,
        out: &mut String,
        _values: &[CellValue],
        leaves: usize,
        _width: usize,
        node: &TreeNode,
    ) {
        let highlighted = node
            .coordinates
            .iter()
            .any(|c| self.is_highlighted(c.row, c.col));
        let css_class = if highlighted {
            " class=\"highlighted\""
        } else {
            ""
        };
        if leaves < 2 {
            out.push_str(&format!("<td{}>", css_class));
        } else {
            out.push_str(&format!("<td{} rowspan=\"{}\">", css_class, leaves));
        }
        let linked = !node.coordinates.is_empty();
        if linked {
            let first = node.coordinates[0];
            let id = CellRef::new(self.table_id, first.row, first.col).datapoint_id();
            out.push_str(&format!(
                "<a class=\"explanation\" title=\"Click to see where this value comes from\" href=\"{}?id={}\">",
                self.explain_prefix, id
            ));
        }
        out.push_str(&node.value.to_string());
        if linked {
            out.push_str("</a>");
        }
        out.push_str("</td>");
    }

    fn print_repeated_cell(&mut self, _out: &mut String, _values: &[CellValue], _index: usize) {
        // The first occurrence already spans this row.
    }

    fn end_row(&mut self, out: &mut String, _width: usize) {
        out.push_str("</tr>\n");
    }

    fn end_body(&mut self, out: &mut String) {
        out.push_str("</tbody>\n");
    }

    fn end_structure(&mut self, out: &mut String) {
        out.push_str("</table>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::render::render;
    use crate::snapshot::TableSnapshot;

    fn sample() -> TableSnapshot {
        let columns = vec!["G".to_string(), "V".to_string()];
        let mut s = TableSnapshot::new(4, columns);
        s.push(Entry::of("G", 5).with("V", "a"));
        s.push(Entry::of("G", 5).with("V", "b"));
        s.push(Entry::of("G", 1).with("V", "c"));
        s
    }

    #[test]
    fn test_repeated_dimension_gets_rowspan() {
        let s = sample();
        let tree = s.tree();
        let mut renderer = HtmlRenderer::new(s.id());
        let out = render(&mut renderer, &tree, &s.default_ordering());
        // The 5 group covers two leaf rows.
        assert!(out.contains("rowspan=\"2\""));
        // Three leaf rows plus the header line.
        assert_eq!(out.matches("<tr>").count(), 3);
        assert!(out.contains("<th>G</th><th>V</th>"));
    }

    #[test]
    fn test_explain_links_carry_datapoint_ids() {
        let s = sample();
        let tree = s.tree();
        let mut renderer = HtmlRenderer::new(s.id());
        let out = render(&mut renderer, &tree, &s.default_ordering());
        // The 1 group originates from source row 2, column 0.
        assert!(out.contains("href=\"explain?id=T4:2:0\""));
    }

    #[test]
    fn test_highlighted_cells_get_css_class() {
        let s = sample();
        let tree = s.tree();
        let mut renderer = HtmlRenderer::new(s.id()).with_highlighted([(2, 0)]);
        let out = render(&mut renderer, &tree, &s.default_ordering());
        assert!(out.contains("class=\"highlighted\""));
    }

    #[test]
    fn test_empty_tree_renders_marker() {
        let s = TableSnapshot::new(1, vec!["A".to_string()]);
        let tree = s.tree();
        let mut renderer = HtmlRenderer::new(1);
        assert_eq!(
            render(&mut renderer, &tree, &s.default_ordering()),
            "<table border=\"1\"></table>"
        );
    }
}
