//! Grouping trees.
//!
//! A [`GroupTree`] partitions the rows of a snapshot by successive key
//! columns: nodes at depth *d* were split on the *d*-th column of the
//! ordering, and siblings are sorted by their cell value under the total
//! order. The tree is an arena (a flat vector of nodes addressed by index,
//! children stored as index lists), which avoids ownership cycles and keeps
//! structural comparison cheap in tests. Trees are built on demand and
//! discarded after rendering.

use crate::entry::Entry;
use crate::snapshot::TableSnapshot;
use crate::value::CellValue;
use std::collections::BTreeMap;
use std::fmt;

/// A cell position inside a snapshot, by row index and column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoordinate {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Index of a node within its tree's arena.
pub type NodeId = usize;

/// One node of a grouping tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// The grouping-key column this node was partitioned on. Empty for the
    /// synthetic root.
    pub key: String,
    /// The shared cell value of the rows under this node.
    pub value: CellValue,
    /// The originating cells: one coordinate per row sharing `value` at this
    /// depth, with the column position of the partitioning key.
    pub coordinates: Vec<CellCoordinate>,
    /// Child node indices, sorted by the children's values.
    pub children: Vec<NodeId>,
}

/// A tree built by recursively partitioning a snapshot's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl GroupTree {
    /// Builds the tree for a snapshot under an explicit column ordering.
    ///
    /// Recursion depth is bounded by the number of grouping columns, not by
    /// the row count.
    pub fn build(snapshot: &TableSnapshot, ordering: &[String]) -> Self {
        let mut builder = Builder {
            nodes: Vec::new(),
            entries: snapshot.rows(),
            ordering,
        };
        let all_rows: Vec<usize> = (0..snapshot.row_count()).collect();
        let children = builder.build_level(&all_rows, 0);
        let root = builder.push(TreeNode {
            key: String::new(),
            value: CellValue::Empty,
            coordinates: Vec::new(),
            children,
        });
        Self {
            nodes: builder.nodes,
            root,
        }
    }

    /// The synthetic root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Shared access to a node of the arena.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no data (the root has no children).
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].children.is_empty()
    }

    /// Number of descendant leaves under a node; a childless node counts as
    /// one leaf. Used to size row-spans when rendering.
    pub fn count_leaves(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];
        if node.children.is_empty() {
            return 1;
        }
        node.children.iter().map(|&c| self.count_leaves(c)).sum()
    }
}

struct Builder<'a> {
    nodes: Vec<TreeNode>,
    entries: &'a [Entry],
    ordering: &'a [String],
}

impl Builder<'_> {
    fn push(&mut self, node: TreeNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Partitions `rows` on the column at `depth` and recurses into each
    /// partition. Returns the child node ids, sorted by partition value.
    fn build_level(&mut self, rows: &[usize], depth: usize) -> Vec<NodeId> {
        if depth >= self.ordering.len() {
            return Vec::new();
        }
        let key = &self.ordering[depth];
        // BTreeMap keys are the partition values; iteration order is the
        // sibling order required by the tree invariant.
        let mut partition: BTreeMap<CellValue, Vec<usize>> = BTreeMap::new();
        for &row in rows {
            let value = self.entries[row].get(key).cloned().unwrap_or_default();
            partition.entry(value).or_default().push(row);
        }
        let mut children = Vec::with_capacity(partition.len());
        for (value, member_rows) in partition {
            let coordinates = member_rows
                .iter()
                .map(|&r| CellCoordinate {
                    row: self.entries[r].row_index(),
                    col: depth,
                })
                .collect();
            let grand_children = self.build_level(&member_rows, depth + 1);
            let id = self.push(TreeNode {
                key: key.clone(),
                value,
                coordinates,
                children: grand_children,
            });
            children.push(id);
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    fn grouped_snapshot() -> TableSnapshot {
        // Three rows, grouped by G with values {5, 5, 1}.
        let columns = vec!["G".to_string(), "V".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("G", 5).with("V", "a"));
        s.push(Entry::of("G", 5).with("V", "b"));
        s.push(Entry::of("G", 1).with("V", "c"));
        s
    }

    #[test]
    fn test_siblings_sorted_by_value() {
        let s = grouped_snapshot();
        let tree = s.tree();
        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.node(root.children[0]).value, CellValue::Number(1.0));
        assert_eq!(tree.node(root.children[1]).value, CellValue::Number(5.0));
    }

    #[test]
    fn test_leaf_rows_partition_the_parent() {
        let s = grouped_snapshot();
        let tree = s.tree();
        let root = tree.node(tree.root());
        let five = tree.node(root.children[1]);
        assert_eq!(five.coordinates.len(), 2);
        let rows: Vec<usize> = five.coordinates.iter().map(|c| c.row).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(tree.count_leaves(root.children[1]), 2);
        assert_eq!(tree.count_leaves(root.children[0]), 1);
        // Union of the children's rows is the root's full row set.
        let total: usize = root
            .children
            .iter()
            .map(|&c| tree.node(c).coordinates.len())
            .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_depth_matches_ordering() {
        let s = grouped_snapshot();
        let tree = s.tree();
        let root = tree.node(tree.root());
        let five = tree.node(root.children[1]);
        assert_eq!(five.key, "G");
        assert_eq!(five.coordinates[0].col, 0);
        let leaf = tree.node(five.children[0]);
        assert_eq!(leaf.key, "V");
        assert_eq!(leaf.coordinates[0].col, 1);
    }

    #[test]
    fn test_missing_key_groups_as_empty_and_sorts_last() {
        let columns = vec!["G".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("G", 1));
        s.push(Entry::new());
        let tree = s.tree();
        let root = tree.node(tree.root());
        assert_eq!(tree.node(root.children[0]).value, CellValue::Number(1.0));
        assert_eq!(tree.node(root.children[1]).value, CellValue::Empty);
    }

    #[test]
    fn test_empty_snapshot_gives_empty_tree() {
        let s = TableSnapshot::new(1, vec!["A".to_string()]);
        assert!(s.tree().is_empty());
    }
}
