//! CSV rendering of a grouping tree.

use super::Renderer;
use crate::tree::TreeNode;
use crate::value::CellValue;

/// Renders a grouping tree as CSV text: one header line of column names,
/// then one line per leaf row. Text cells are emitted unquoted, verbatim.
#[derive(Debug, Clone)]
pub struct CsvRenderer {
    separator: String,
    missing: String,
    terminator: String,
    col: usize,
}

impl CsvRenderer {
    /// Creates a renderer with an explicit field separator and
    /// missing-value token.
    pub fn new(separator: impl Into<String>, missing: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            missing: missing.into(),
            terminator: "\n".to_string(),
            col: 0,
        }
    }

    /// Overrides the line terminator (defaults to `\n`).
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    fn print_value(&mut self, out: &mut String, value: &CellValue) {
        if self.col > 0 {
            out.push_str(&self.separator);
        }
        if value.is_empty() {
            out.push_str(&self.missing);
        } else {
            out.push_str(&value.to_string());
        }
        self.col += 1;
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new(",", "?")
    }
}

impl Renderer for CsvRenderer {
    fn print_key(&mut self, out: &mut String, key: &str) {
        if self.col > 0 {
            out.push_str(&self.separator);
        }
        out.push_str(key);
        self.col += 1;
    }

    fn end_keys(&mut self, out: &mut String) {
        out.push_str(&self.terminator);
        self.col = 0;
    }

    fn print_cell(
        &mut self,
        out: &mut String,
        _values: &[CellValue],
        _leaves: usize,
        _width: usize,
        node: &TreeNode,
    ) {
        self.print_value(out, &node.value);
    }

    fn print_repeated_cell(&mut self, out: &mut String, values: &[CellValue], index: usize) {
        self.print_value(out, &values[index]);
    }

    fn end_row(&mut self, out: &mut String, _width: usize) {
        out.push_str(&self.terminator);
        self.col = 0;
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
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("G", 5).with("V", "a"));
        s.push(Entry::of("G", 5).with("V", "b"));
        s.push(Entry::of("G", 1).with("V", "c"));
        s
    }

    #[test]
    fn test_repeated_values_emitted_literally() {
        let s = sample();
        let ordering = s.default_ordering();
        let tree = s.tree();
        let mut renderer = CsvRenderer::default();
        let out = render(&mut renderer, &tree, &ordering);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["G,V", "1,c", "5,a", "5,b"]);
    }

    #[test]
    fn test_custom_separator_and_missing() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 1));
        let ordering = s.default_ordering();
        let tree = s.tree();
        let mut renderer = CsvRenderer::new(";", "n/a");
        let out = render(&mut renderer, &tree, &ordering);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["A;B", "1;n/a"]);
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let s = TableSnapshot::new(1, vec!["A".to_string()]);
        let ordering = s.default_ordering();
        let tree = s.tree();
        let mut renderer = CsvRenderer::default();
        assert_eq!(render(&mut renderer, &tree, &ordering), "");
    }
}
