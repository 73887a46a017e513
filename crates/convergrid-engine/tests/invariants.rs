//! Property tests for the span and leaf-count invariants.

use convergrid_common::{Axis, Segment};
use convergrid_engine::tree::{AxisNode, AxisTree};
use convergrid_engine::{GridCell, layout};
use proptest::prelude::*;

fn segment_lists() -> impl Strategy<Value = Vec<Vec<Segment>>> {
    // 0-3 variables per axis, each resolving to 1-5 segments.
    prop::collection::vec(
        prop::collection::vec("[a-z]{1,6}", 1..=5)
            .prop_map(|labels| labels.into_iter().map(Segment::labeled).collect()),
        0..=3,
    )
}

fn check_span_invariant(node: &AxisNode) {
    if node.is_leaf() {
        assert_eq!(node.leaf_count(), 1);
    } else {
        let child_sum: usize = node.children.iter().map(AxisNode::leaf_count).sum();
        assert_eq!(node.leaf_count(), child_sum);
        for child in &node.children {
            check_span_invariant(child);
        }
    }
}

proptest! {
    /// Every node's span equals 1 (leaf) or the sum of its children's.
    #[test]
    fn span_invariant_holds(lists in segment_lists()) {
        let tree = AxisTree::build(&lists);
        for node in &tree.nodes {
            check_span_invariant(node);
        }
    }

    /// The leaf count is the product of the per-variable segment counts.
    #[test]
    fn leaf_count_is_multiplicative(lists in segment_lists()) {
        let tree = AxisTree::build(&lists);
        let expected: usize = if lists.is_empty() {
            1
        } else {
            lists.iter().map(Vec::len).product()
        };
        prop_assert_eq!(tree.leaf_count(), expected);
        prop_assert_eq!(tree.leaf_segments().len(), expected);
    }

    /// Layout cells at every depth tile the axis exactly once.
    #[test]
    fn layout_tiles_each_depth(lists in segment_lists(), origin in 0u32..4) {
        let tree = AxisTree::build(&lists);
        let cells = layout(&tree, Axis::X, origin, 1);
        let total = tree.leaf_count() as u32;
        if lists.is_empty() {
            prop_assert_eq!(cells.len(), 1);
            return Ok(());
        }
        let max_depth = cells.iter().map(|c| c.row).max().unwrap_or(0);
        for depth in 0..=max_depth {
            let mut row: Vec<&GridCell> = cells.iter().filter(|c| c.row == depth).collect();
            row.sort_by_key(|c| c.column);
            let mut cursor = origin;
            for cell in &row {
                prop_assert_eq!(cell.column, cursor);
                cursor += cell.span;
            }
            prop_assert_eq!(cursor, origin + total);
            // Exactly the last cell of each depth touches the boundary.
            let boundary_count = row.iter().filter(|c| c.is_axis_boundary).count();
            prop_assert_eq!(boundary_count, 1);
            prop_assert!(row.last().is_some_and(|c| c.is_axis_boundary));
        }
    }
}
