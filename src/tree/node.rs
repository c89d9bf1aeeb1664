//! Arena node representation of a dumped tree.
//!
//! A node is either a split carrying its decision and the arena positions of
//! its two children, or a leaf carrying its prediction. Every node knows its
//! parent and which branch of the parent it hangs from.

use crate::core::types::{DataCount, DecisionType, FeatureIndex, NodeIndex};
use crate::io::dump::{LeafNode, Threshold};

/// Which branch of its parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The root has no parent
    Root,
    /// Left child, taken when the decision holds
    Yes,
    /// Right child, taken otherwise
    No,
}

impl Branch {
    /// Branch side as the color flag used when styling splits: `Some(true)`
    /// for yes-children, `Some(false)` for no-children, `None` for the root.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Branch::Root => None,
            Branch::Yes => Some(true),
            Branch::No => Some(false),
        }
    }
}

/// Split payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitData {
    /// Split identifier, unique within the tree
    pub split_index: usize,
    /// Feature tested by the split
    pub split_feature: FeatureIndex,
    /// Comparison operator
    pub decision_type: DecisionType,
    /// Threshold as dumped
    pub threshold: Threshold,
    /// Gain of the split
    pub split_gain: Option<f64>,
    /// Output the node would have as a leaf
    pub internal_value: Option<f64>,
    /// Sum of hessians reaching the node
    pub internal_weight: Option<f64>,
    /// Number of records reaching the node
    pub internal_count: Option<DataCount>,
    /// Arena position of the yes-child
    pub left_child: NodeIndex,
    /// Arena position of the no-child
    pub right_child: NodeIndex,
}

/// Leaf payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafData {
    /// Leaf identifier, unique within the tree
    pub leaf_index: usize,
    /// Predicted value
    pub leaf_value: f64,
    /// Sum of hessians reaching the leaf
    pub leaf_weight: Option<f64>,
    /// Number of records reaching the leaf
    pub leaf_count: Option<DataCount>,
}

impl From<&LeafNode> for LeafData {
    fn from(leaf: &LeafNode) -> Self {
        LeafData {
            leaf_index: leaf.leaf_index,
            leaf_value: leaf.leaf_value,
            leaf_weight: leaf.leaf_weight,
            leaf_count: leaf.leaf_count,
        }
    }
}

/// Kind-specific payload of an arena node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Internal decision node
    Split(SplitData),
    /// Terminal node
    Leaf(LeafData),
}

/// Node stored in a [`TreeArena`](crate::tree::TreeArena).
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaNode {
    kind: NodeKind,
    parent: Option<NodeIndex>,
    branch: Branch,
    depth: usize,
}

impl ArenaNode {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeIndex>, branch: Branch, depth: usize) -> Self {
        ArenaNode {
            kind,
            parent,
            branch,
            depth,
        }
    }

    /// Node payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Parent position, `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Branch of the parent this node hangs from.
    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Graph identifier: `split<index>` or `leaf<index>`.
    pub fn id(&self) -> String {
        match &self.kind {
            NodeKind::Split(split) => format!("split{}", split.split_index),
            NodeKind::Leaf(leaf) => format!("leaf{}", leaf.leaf_index),
        }
    }

    /// Number of records reaching the node, if dumped.
    pub fn count(&self) -> Option<DataCount> {
        match &self.kind {
            NodeKind::Split(split) => split.internal_count,
            NodeKind::Leaf(leaf) => leaf.leaf_count,
        }
    }

    /// Children positions `(yes, no)` of a split.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        match &self.kind {
            NodeKind::Split(split) => Some((split.left_child, split.right_child)),
            NodeKind::Leaf(_) => None,
        }
    }
}
