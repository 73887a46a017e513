//! Header layout: map axis tree nodes to grid coordinates and spans.
//!
//! Pure span/position bookkeeping, independent of any rendering technology.
//! X trees produce column headers (one header row per nesting depth), Y trees
//! produce row headers (one header column per depth). The lead corner
//! reserved for the opposite axis's headers enters as `origin`.

use convergrid_common::Axis;

use crate::tree::{AxisNode, AxisTree};

/// One placed header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
    /// Count of leaf descendants the cell covers (merged-header width).
    pub span: u32,
    /// Set on cells whose leaf range touches the final leaf position; the
    /// renderer uses it to close off the outer border.
    pub is_axis_boundary: bool,
}

/// Place every node of `tree` on the grid.
///
/// `origin` is the lead offset along the leaf axis (for an X tree: the number
/// of header columns the Y axis occupies, and vice versa).
/// `opposite_leaf_count` only matters for the undeclared-axis edge case,
/// where the single implicit header cell spans the opposite axis's leaves.
pub fn layout(tree: &AxisTree, axis: Axis, origin: u32, opposite_leaf_count: u32) -> Vec<GridCell> {
    if !tree.is_declared() {
        return vec![place(axis, 0, origin, opposite_leaf_count.max(1), true)];
    }

    let total = tree.leaf_count() as u32;
    let mut cells = Vec::new();
    let mut position = 0u32;
    for node in &tree.nodes {
        visit(node, axis, 0, origin, &mut position, total, &mut cells);
    }
    cells
}

/// Depth-first pre-order walk. Children start at their parent's position and
/// subdivide its span; the running position advances only after a whole
/// subtree is finished.
fn visit(
    node: &AxisNode,
    axis: Axis,
    depth: u32,
    origin: u32,
    position: &mut u32,
    total_leaves: u32,
    cells: &mut Vec<GridCell>,
) {
    let span = node.leaf_count() as u32;
    let at_boundary = *position + span == total_leaves;
    cells.push(place(axis, depth, origin + *position, span, at_boundary));

    let mut child_position = *position;
    for child in &node.children {
        let child_span = child.leaf_count() as u32;
        let mut cursor = child_position;
        visit(
            child,
            axis,
            depth + 1,
            origin,
            &mut cursor,
            total_leaves,
            cells,
        );
        child_position += child_span;
    }

    *position += span;
}

fn place(axis: Axis, depth: u32, position: u32, span: u32, is_axis_boundary: bool) -> GridCell {
    let (row, column) = match axis {
        Axis::X => (depth, position),
        Axis::Y => (position, depth),
    };
    GridCell {
        row,
        column,
        span,
        is_axis_boundary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convergrid_common::Segment;

    fn labels(values: &[&str]) -> Vec<Segment> {
        values.iter().map(|v| Segment::labeled(*v)).collect()
    }

    #[test]
    fn single_level_x_axis_lays_out_one_row() {
        let tree = AxisTree::build(&[labels(&["a", "b", "c"])]);
        let cells = layout(&tree, Axis::X, 2, 1);
        assert_eq!(cells.len(), 3);
        assert_eq!(
            cells,
            vec![
                GridCell { row: 0, column: 2, span: 1, is_axis_boundary: false },
                GridCell { row: 0, column: 3, span: 1, is_axis_boundary: false },
                GridCell { row: 0, column: 4, span: 1, is_axis_boundary: true },
            ]
        );
    }

    #[test]
    fn nested_axis_subdivides_parent_spans() {
        let tree = AxisTree::build(&[labels(&["p", "q"]), labels(&["1", "2", "3"])]);
        let cells = layout(&tree, Axis::X, 1, 1);

        // Pre-order: p, p/1, p/2, p/3, q, q/1, q/2, q/3.
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], GridCell { row: 0, column: 1, span: 3, is_axis_boundary: false });
        assert_eq!(cells[1], GridCell { row: 1, column: 1, span: 1, is_axis_boundary: false });
        assert_eq!(cells[3], GridCell { row: 1, column: 3, span: 1, is_axis_boundary: false });
        assert_eq!(cells[4], GridCell { row: 0, column: 4, span: 3, is_axis_boundary: true });
        assert_eq!(cells[7], GridCell { row: 1, column: 6, span: 1, is_axis_boundary: true });
    }

    #[test]
    fn y_axis_swaps_coordinates() {
        let tree = AxisTree::build(&[labels(&["r1", "r2"])]);
        let cells = layout(&tree, Axis::Y, 1, 1);
        assert_eq!(cells[0], GridCell { row: 1, column: 0, span: 1, is_axis_boundary: false });
        assert_eq!(cells[1], GridCell { row: 2, column: 0, span: 1, is_axis_boundary: true });
    }

    #[test]
    fn parent_span_equals_sum_of_children() {
        let tree = AxisTree::build(&[
            labels(&["a", "b"]),
            labels(&["1", "2"]),
            labels(&["x", "y", "z"]),
        ]);
        for node in &tree.nodes {
            let child_sum: usize = node.children.iter().map(|c| c.leaf_count()).sum();
            assert_eq!(node.leaf_count(), child_sum);
        }
        let cells = layout(&tree, Axis::X, 0, 1);
        // Depth-0 cells span 6, depth-1 span 3, depth-2 span 1.
        assert_eq!(cells.iter().filter(|c| c.row == 0).map(|c| c.span).sum::<u32>(), 12);
        assert!(cells.iter().filter(|c| c.row == 2).all(|c| c.span == 1));
    }

    #[test]
    fn boundary_marks_the_last_node_at_each_depth() {
        let tree = AxisTree::build(&[labels(&["a", "b"]), labels(&["1", "2"])]);
        let cells = layout(&tree, Axis::X, 0, 1);
        let boundaries: Vec<_> = cells.iter().filter(|c| c.is_axis_boundary).collect();
        // b (depth 0) and b/2 (depth 1).
        assert_eq!(boundaries.len(), 2);
        assert!(boundaries.iter().any(|c| c.row == 0 && c.span == 2));
        assert!(boundaries.iter().any(|c| c.row == 1 && c.span == 1));
    }

    #[test]
    fn undeclared_axis_emits_one_spanning_cell() {
        let tree = AxisTree::build(&[]);
        let cells = layout(&tree, Axis::X, 2, 6);
        assert_eq!(
            cells,
            vec![GridCell { row: 0, column: 2, span: 6, is_axis_boundary: true }]
        );
    }

    #[test]
    fn declared_axis_with_zero_leaves_emits_nothing() {
        let tree = AxisTree::build(&[Vec::new()]);
        let cells = layout(&tree, Axis::Y, 1, 4);
        assert!(cells.is_empty());
    }
}
