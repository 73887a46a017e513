//! Axis tree construction: cartesian refinement of ordered variables.
//!
//! The outermost variable's segments become the top-level nodes; each
//! successive variable's segments are attached under every current leaf, so
//! an axis with segment counts `[a, b]` carries `a * b` leaves. A variable
//! resolving to zero segments zeroes the whole axis (a zero factor in the
//! product); an axis with no declared variables at all gets one implicit
//! unlabeled leaf so the grid always has at least a 1x1 data region.

use convergrid_common::Segment;

/// One node of an axis segment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisNode {
    pub segment: Segment,
    pub children: Vec<AxisNode>,
}

impl AxisNode {
    pub fn leaf(segment: Segment) -> Self {
        Self {
            segment,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.segment.label
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count of leaf descendants; 1 if the node itself is a leaf.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(AxisNode::leaf_count).sum()
        }
    }

    /// Nesting depth below and including this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(AxisNode::depth)
            .max()
            .unwrap_or(0)
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Segment>) {
        if self.children.is_empty() {
            out.push(&self.segment);
        } else {
            for child in &self.children {
                child.collect_leaves(out);
            }
        }
    }
}

/// The hierarchical segment tree of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTree {
    pub nodes: Vec<AxisNode>,
    declared: bool,
}

impl AxisTree {
    /// Build a tree from the resolved segment lists of an axis's variables,
    /// in declaration order (outermost first).
    pub fn build(segment_lists: &[Vec<Segment>]) -> Self {
        if segment_lists.is_empty() {
            return Self {
                nodes: Vec::new(),
                declared: false,
            };
        }
        Self {
            nodes: nest(segment_lists),
            declared: true,
        }
    }

    /// Whether any variable was declared on this axis. An undeclared axis
    /// still contributes one implicit leaf; a declared axis whose variables
    /// all resolved empty contributes zero.
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    pub fn leaf_count(&self) -> usize {
        if !self.declared {
            return 1;
        }
        self.nodes.iter().map(AxisNode::leaf_count).sum()
    }

    /// Flattened leaf segments in grid order. The undeclared axis yields a
    /// single unlabeled segment (the implicit "no grouping" leaf).
    pub fn leaf_segments(&self) -> Vec<Segment> {
        if !self.declared {
            return vec![Segment::labeled("")];
        }
        let mut refs = Vec::new();
        for node in &self.nodes {
            node.collect_leaves(&mut refs);
        }
        refs.into_iter().cloned().collect()
    }

    /// Header depth: one level per participating variable, minimum 1 so the
    /// opposite axis always has a lead-corner offset.
    pub fn depth(&self) -> usize {
        self.nodes
            .iter()
            .map(AxisNode::depth)
            .max()
            .unwrap_or(1)
    }
}

/// Nest `lists[0]` over the tree built from the remaining lists. A node whose
/// inner variables resolved empty is pruned so childless nodes only ever
/// appear at full depth.
fn nest(lists: &[Vec<Segment>]) -> Vec<AxisNode> {
    let Some((head, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let template = nest(rest);
    if !rest.is_empty() && template.is_empty() {
        return Vec::new();
    }
    head.iter()
        .map(|segment| AxisNode {
            segment: segment.clone(),
            children: template.clone(),
        })
        .collect()
}
