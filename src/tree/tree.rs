//! Arena form of a single dumped tree.
//!
//! The recursive dump is flattened in pre-order into a contiguous vector;
//! index 0 is always the root and each node stores its parent and branch.

use crate::core::error::{PlotError, Result};
use crate::core::types::{DataCount, DecisionType, NodeIndex};
use crate::io::dump::DumpNode;
use crate::tree::node::{ArenaNode, Branch, LeafData, NodeKind, SplitData};
use std::collections::HashSet;
use std::fmt;

/// Flattened tree, nodes in depth-first pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
}

impl TreeArena {
    /// Position of the root node.
    pub const ROOT: NodeIndex = 0;

    /// Flatten a dumped tree.
    ///
    /// Fails with [`PlotError::InvalidDecisionType`] on an unknown split
    /// operator and with [`PlotError::InvalidParameter`] when split or leaf
    /// indices repeat.
    pub fn from_dump(root: &DumpNode) -> Result<Self> {
        let mut arena = TreeArena { nodes: Vec::new() };
        arena.push(root, None, Branch::Root, 0)?;
        arena.validate()?;
        Ok(arena)
    }

    fn push(
        &mut self,
        node: &DumpNode,
        parent: Option<NodeIndex>,
        branch: Branch,
        depth: usize,
    ) -> Result<NodeIndex> {
        let index = self.nodes.len();
        match node {
            DumpNode::Leaf(leaf) => {
                self.nodes.push(ArenaNode::new(
                    NodeKind::Leaf(LeafData::from(leaf)),
                    parent,
                    branch,
                    depth,
                ));
            }
            DumpNode::Split(split) => {
                let decision_type = DecisionType::parse(&split.decision_type, split.split_index)?;
                self.nodes.push(ArenaNode::new(
                    NodeKind::Split(SplitData {
                        split_index: split.split_index,
                        split_feature: split.split_feature,
                        decision_type,
                        threshold: split.threshold.clone(),
                        split_gain: split.split_gain,
                        internal_value: split.internal_value,
                        internal_weight: split.internal_weight,
                        internal_count: split.internal_count,
                        // patched once the children are pushed
                        left_child: index,
                        right_child: index,
                    }),
                    parent,
                    branch,
                    depth,
                ));

                let left = self.push(&split.left_child, Some(index), Branch::Yes, depth + 1)?;
                let right = self.push(&split.right_child, Some(index), Branch::No, depth + 1)?;
                if let NodeKind::Split(data) = self.nodes[index].kind_mut() {
                    data.left_child = left;
                    data.right_child = right;
                }
            }
        }
        Ok(index)
    }

    /// Check that split and leaf identifiers are unique.
    pub fn validate(&self) -> Result<()> {
        let mut splits = HashSet::new();
        let mut leaves = HashSet::new();
        for node in &self.nodes {
            let fresh = match node.kind() {
                NodeKind::Split(split) => splits.insert(split.split_index),
                NodeKind::Leaf(leaf) => leaves.insert(leaf.leaf_index),
            };
            if !fresh {
                return Err(PlotError::invalid_parameter(
                    "tree_structure",
                    node.id(),
                    "node identifiers must be unique within a tree",
                ));
            }
        }
        Ok(())
    }

    /// The root node.
    pub fn root(&self) -> &ArenaNode {
        &self.nodes[Self::ROOT]
    }

    /// Node at the given position.
    pub fn node(&self, index: NodeIndex) -> Option<&ArenaNode> {
        self.nodes.get(index)
    }

    /// Total number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of splits.
    pub fn num_splits(&self) -> usize {
        self.num_nodes() - self.num_leaves()
    }

    /// Depth of the deepest node.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(ArenaNode::depth).max().unwrap_or(0)
    }

    /// Records reaching the root, the denominator for data percentages.
    pub fn total_count(&self) -> Option<DataCount> {
        self.root().count()
    }

    /// Nodes in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &ArenaNode)> {
        self.nodes.iter().enumerate()
    }
}

impl fmt::Display for TreeArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            let indent = "  ".repeat(node.depth());
            match node.kind() {
                NodeKind::Split(split) => writeln!(
                    f,
                    "{}{}: feature {} {} {}",
                    indent, node.id(), split.split_feature, split.decision_type, split.threshold
                )?,
                NodeKind::Leaf(leaf) => {
                    writeln!(f, "{}{}: {:?}", indent, node.id(), leaf.leaf_value)?
                }
            }
        }
        Ok(())
    }
}
