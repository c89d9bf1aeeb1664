//! Serde types for the LightGBM `dump_model` JSON document.
//!
//! Only the fields needed to draw a tree are modeled; everything else in the
//! dump (feature infos, monotone constraints, pandas categoricals, ...) is
//! ignored on read.

use crate::core::error::{PlotError, Result};
use crate::core::types::{DataCount, FeatureIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Top-level model dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDump {
    /// Model kind, `"tree"` for boosted trees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Dump format version, e.g. `"v4"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Number of classes of the objective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_class: Option<usize>,
    /// Trees trained per boosting iteration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_tree_per_iteration: Option<usize>,
    /// Highest feature index used by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_feature_idx: Option<usize>,
    /// Objective string as written by LightGBM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    /// Display names of the features, indexed by feature index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// One entry per trained tree
    pub tree_info: Vec<TreeInfo>,
}

impl ModelDump {
    /// Parse a dump from its JSON text.
    ///
    /// Nesting depth is unbounded: deep trees grow the stack on demand
    /// instead of hitting the parser's recursion limit.
    pub fn from_json_str(json: &str) -> Result<Self> {
        parse_dump(serde_json::Deserializer::from_str(json))
    }

    /// Parse a dump from a JSON byte stream.
    pub fn from_json_reader<R: io::Read>(reader: R) -> Result<Self> {
        parse_dump(serde_json::Deserializer::from_reader(reader))
    }

    /// Number of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.tree_info.len()
    }

    /// Select one tree by position.
    pub fn tree(&self, tree_index: usize) -> Result<&TreeInfo> {
        self.tree_info
            .get(tree_index)
            .ok_or_else(|| PlotError::index_out_of_range(tree_index, self.tree_info.len()))
    }

    /// Feature names as a slice, if the dump carries them.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

fn parse_dump<'de, R>(mut deserializer: serde_json::Deserializer<R>) -> Result<ModelDump>
where
    R: serde_json::de::Read<'de>,
{
    deserializer.disable_recursion_limit();
    let dump = ModelDump::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(dump)
}

/// One tree of the ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeInfo {
    /// Position of the tree in the ensemble
    #[serde(default)]
    pub tree_index: usize,
    /// Number of leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_leaves: Option<usize>,
    /// Number of categorical splits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_cat: Option<usize>,
    /// Shrinkage applied to the tree output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shrinkage: Option<f64>,
    /// Root of the tree
    pub tree_structure: DumpNode,
}

/// A node of a dumped tree: either a split or a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DumpNode {
    /// Internal decision node
    Split(SplitNode),
    /// Terminal node
    Leaf(LeafNode),
}

impl DumpNode {
    /// Sample count of the node, if dumped.
    pub fn count(&self) -> Option<DataCount> {
        match self {
            DumpNode::Split(split) => split.internal_count,
            DumpNode::Leaf(leaf) => leaf.leaf_count,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, DumpNode::Leaf(_))
    }
}

/// Dumped split node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    /// Split identifier, unique within the tree
    pub split_index: usize,
    /// Feature tested by the split
    pub split_feature: FeatureIndex,
    /// Improvement of the objective brought by the split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_gain: Option<f64>,
    /// Threshold, numeric or a `||`-joined category list
    pub threshold: Threshold,
    /// Comparison operator, `<=` or `==` in valid dumps
    pub decision_type: String,
    /// Direction taken by missing values
    #[serde(default)]
    pub default_left: bool,
    /// Missing value handling, `None`, `Zero` or `NaN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_type: Option<String>,
    /// Output the node would have as a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_value: Option<f64>,
    /// Sum of hessians reaching the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_weight: Option<f64>,
    /// Number of records reaching the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_count: Option<DataCount>,
    /// Subtree taken when the decision holds
    pub left_child: Box<DumpNode>,
    /// Subtree taken otherwise
    pub right_child: Box<DumpNode>,
}

/// Dumped leaf node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Leaf identifier; single-leaf trees omit it
    #[serde(default)]
    pub leaf_index: usize,
    /// Predicted value
    pub leaf_value: f64,
    /// Sum of hessians reaching the leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_weight: Option<f64>,
    /// Number of records reaching the leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_count: Option<DataCount>,
}

/// Split threshold as dumped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    /// Numerical threshold
    Numeric(f64),
    /// Categorical threshold such as `"1||4||7"`, always shown verbatim
    Categorical(String),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Numeric(value) => write!(f, "{:?}", value),
            Threshold::Categorical(categories) => f.write_str(categories),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUMP: &str = r#"{
        "name": "tree",
        "version": "v4",
        "num_class": 1,
        "feature_names": ["mean_radius", "mean_texture"],
        "tree_info": [{
            "tree_index": 0,
            "num_leaves": 2,
            "num_cat": 0,
            "shrinkage": 1,
            "tree_structure": {
                "split_index": 0,
                "split_feature": 1,
                "split_gain": 12.5,
                "threshold": 17.5,
                "decision_type": "<=",
                "default_left": true,
                "missing_type": "None",
                "internal_value": 0,
                "internal_weight": 0,
                "internal_count": 200,
                "left_child": {"leaf_index": 0, "leaf_value": 0.25, "leaf_weight": 30.5, "leaf_count": 120},
                "right_child": {"leaf_index": 1, "leaf_value": -0.5, "leaf_weight": 20.25, "leaf_count": 80}
            }
        }],
        "feature_importances": {"mean_texture": 1}
    }"#;

    #[test]
    fn test_parse_stump() {
        let dump = ModelDump::from_json_str(STUMP).unwrap();
        assert_eq!(dump.num_trees(), 1);
        assert_eq!(dump.feature_names().map(<[String]>::len), Some(2));

        let tree = dump.tree(0).unwrap();
        match &tree.tree_structure {
            DumpNode::Split(split) => {
                assert_eq!(split.split_feature, 1);
                assert_eq!(split.threshold, Threshold::Numeric(17.5));
                assert_eq!(split.internal_count, Some(200));
                assert!(split.left_child.is_leaf());
                assert_eq!(split.right_child.count(), Some(80));
            }
            DumpNode::Leaf(_) => panic!("root should be a split"),
        }
    }

    #[test]
    fn test_tree_index_out_of_range() {
        let dump = ModelDump::from_json_str(STUMP).unwrap();
        let err = dump.tree(1).unwrap_err();
        assert!(matches!(err, PlotError::IndexOutOfRange { index: 1, length: 1 }));
    }

    #[test]
    fn test_single_leaf_tree() {
        let json = r#"{"tree_info": [{"tree_index": 0, "num_leaves": 1, "tree_structure": {"leaf_value": 0.42}}]}"#;
        let dump = ModelDump::from_json_str(json).unwrap();
        let root = &dump.tree(0).unwrap().tree_structure;
        assert_eq!(root.count(), None);
        match root {
            DumpNode::Leaf(leaf) => {
                assert_eq!(leaf.leaf_index, 0);
                assert_eq!(leaf.leaf_value, 0.42);
            }
            DumpNode::Split(_) => panic!("expected a leaf"),
        }
    }

    #[test]
    fn test_categorical_threshold() {
        let json = r#"{
            "split_index": 3, "split_feature": 0, "threshold": "1||4||7",
            "decision_type": "==", "internal_count": 10,
            "left_child": {"leaf_index": 0, "leaf_value": 1.0},
            "right_child": {"leaf_index": 1, "leaf_value": 2.0}
        }"#;
        let node: DumpNode = serde_json::from_str(json).unwrap();
        match node {
            DumpNode::Split(split) => {
                assert_eq!(split.threshold.to_string(), "1||4||7");
                assert_eq!(split.decision_type, "==");
            }
            DumpNode::Leaf(_) => panic!("expected a split"),
        }
    }

    #[test]
    fn test_missing_tree_info_is_rejected() {
        assert!(ModelDump::from_json_str(r#"{"name": "tree"}"#).is_err());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let json = format!("{} []", STUMP);
        assert!(ModelDump::from_json_str(&json).is_err());
    }

    #[test]
    fn test_deep_chain_parses() {
        let depth = 200;
        let mut node = r#"{"leaf_index": 0, "leaf_value": 0.5}"#.to_string();
        for split in 0..depth {
            node = format!(
                r#"{{"split_index": {}, "split_feature": 0, "threshold": 1.5, "decision_type": "<=",
                    "left_child": {{"leaf_index": {}, "leaf_value": 0.1}}, "right_child": {}}}"#,
                split,
                split + 1,
                node
            );
        }
        let json = format!(r#"{{"tree_info": [{{"tree_index": 0, "tree_structure": {}}}]}}"#, node);

        let dump = ModelDump::from_json_str(&json).unwrap();
        let mut current = &dump.tree(0).unwrap().tree_structure;
        let mut splits = 0;
        while let DumpNode::Split(split) = current {
            splits += 1;
            current = split.right_child.as_ref();
        }
        assert_eq!(splits, depth);

        let from_reader = ModelDump::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(from_reader.num_trees(), 1);
    }
}
