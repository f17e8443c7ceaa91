//! Tree rendering.
//!
//! A [`Renderer`] turns a grouping tree into flat output text. The trait
//! only declares the format-specific hooks (structure, keys, body, row and
//! cell boundaries); the depth-first traversal shared by every format is
//! the free function [`render`], so formats compose with the walk instead
//! of inheriting it.
//!
//! One flat row is emitted per leaf of the tree. When a sibling subtree
//! reuses an ancestor's key value, the repeated value goes through
//! [`Renderer::print_repeated_cell`]: the CSV renderer re-emits it
//! literally, the HTML renderer skips it and merges via row-span.

pub mod csv;
pub mod html;

use crate::tree::{GroupTree, NodeId, TreeNode};
use crate::value::CellValue;

/// Format-specific rendering hooks.
///
/// Hooks with an empty default body are boundaries some formats do not
/// need (CSV, for instance, has no explicit body markers).
pub trait Renderer {
    /// Output emitted for a tree with no data. Should be a syntactically
    /// valid "empty" element of the target format.
    fn empty_table(&self) -> String {
        String::new()
    }

    fn start_structure(&mut self, out: &mut String) {
        let _ = out;
    }

    fn start_keys(&mut self, out: &mut String) {
        let _ = out;
    }

    /// Emits one key header.
    fn print_key(&mut self, out: &mut String, key: &str);

    fn end_keys(&mut self, out: &mut String) {
        let _ = out;
    }

    fn start_body(&mut self, out: &mut String) {
        let _ = out;
    }

    fn start_row(&mut self, out: &mut String, width: usize) {
        let _ = (out, width);
    }

    /// Emits the cell for `node`, whose value is the last element of
    /// `values` (the values accumulated along the path from the root).
    /// `leaves` is the number of descendant leaves of the node, used to
    /// size a row-span.
    fn print_cell(
        &mut self,
        out: &mut String,
        values: &[CellValue],
        leaves: usize,
        width: usize,
        node: &TreeNode,
    );

    /// Emits a cell whose value was already printed in a previous row of
    /// the structure, because a sibling subtree reuses an ancestor's key
    /// value. `index` is the cell's position in the current row.
    fn print_repeated_cell(&mut self, out: &mut String, values: &[CellValue], index: usize);

    fn end_row(&mut self, out: &mut String, width: usize) {
        let _ = (out, width);
    }

    fn end_body(&mut self, out: &mut String) {
        let _ = out;
    }

    fn end_structure(&mut self, out: &mut String) {
        let _ = out;
    }
}

/// Walks a grouping tree depth-first and renders it through the hooks of
/// `renderer`. `ordering` supplies the key headers and the row width.
pub fn render<R: Renderer>(renderer: &mut R, tree: &GroupTree, ordering: &[String]) -> String {
    if tree.is_empty() {
        return renderer.empty_table();
    }
    let width = ordering.len();
    let mut out = String::new();
    renderer.start_structure(&mut out);
    renderer.start_keys(&mut out);
    for key in ordering {
        renderer.print_key(&mut out, key);
    }
    renderer.end_keys(&mut out);
    renderer.start_body(&mut out);
    renderer.start_row(&mut out, width);
    let mut values: Vec<CellValue> = Vec::with_capacity(width);
    render_node(renderer, tree, tree.root(), &mut values, &mut out, width);
    renderer.end_row(&mut out, width);
    renderer.end_body(&mut out);
    renderer.end_structure(&mut out);
    out
}

fn render_node<R: Renderer>(
    renderer: &mut R,
    tree: &GroupTree,
    id: NodeId,
    values: &mut Vec<CellValue>,
    out: &mut String,
    width: usize,
) {
    let node = tree.node(id);
    if !values.is_empty() {
        renderer.print_cell(out, values, tree.count_leaves(id), width, node);
    }
    let mut first_child = true;
    for &child in &node.children {
        values.push(tree.node(child).value.clone());
        if first_child {
            first_child = false;
        } else {
            // A new flat row starts here; re-emit the ancestor values that
            // this row shares with the previous one.
            renderer.end_row(out, width);
            renderer.start_row(out, width);
            for i in 0..values.len() - 1 {
                renderer.print_repeated_cell(out, values, i);
            }
        }
        render_node(renderer, tree, child, values, out, width);
        values.pop();
    }
}
