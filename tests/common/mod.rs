//! Common test fixtures for tree plotting integration tests.

#![allow(dead_code)]

use lightgbm_treeplot::*;
use std::fs;
use std::path::{Path, PathBuf};

/// One split on feature 0 with two leaves, no feature names.
pub const STUMP_DUMP: &str = r#"{
    "name": "tree",
    "version": "v4",
    "num_class": 1,
    "num_tree_per_iteration": 1,
    "max_feature_idx": 0,
    "objective": "regression",
    "tree_info": [
        {
            "tree_index": 0,
            "num_leaves": 2,
            "num_cat": 0,
            "shrinkage": 1,
            "tree_structure": {
                "split_index": 0,
                "split_feature": 0,
                "split_gain": 7.25,
                "threshold": 0.5,
                "decision_type": "<=",
                "default_left": true,
                "missing_type": "None",
                "internal_value": 0.0,
                "internal_weight": 200.0,
                "internal_count": 200,
                "left_child": {
                    "leaf_index": 0,
                    "leaf_value": 0.1,
                    "leaf_weight": 50.0,
                    "leaf_count": 50
                },
                "right_child": {
                    "leaf_index": 1,
                    "leaf_value": -0.2,
                    "leaf_weight": 150.0,
                    "leaf_count": 150
                }
            }
        }
    ]
}"#;

/// Three trees over named features:
///
/// - tree 0: two levels, a numeric split under "yes" and a categorical split
///   under "no"
/// - tree 1: a stump on `city`
/// - tree 2: a single leaf
pub const FOREST_DUMP: &str = r#"{
    "name": "tree",
    "version": "v4",
    "num_class": 1,
    "num_tree_per_iteration": 1,
    "max_feature_idx": 2,
    "objective": "binary sigmoid:1",
    "feature_names": ["age", "income", "city"],
    "tree_info": [
        {
            "tree_index": 0,
            "num_leaves": 4,
            "num_cat": 1,
            "shrinkage": 0.1,
            "tree_structure": {
                "split_index": 0,
                "split_feature": 0,
                "split_gain": 120.5,
                "threshold": 42.5,
                "decision_type": "<=",
                "default_left": true,
                "missing_type": "None",
                "internal_value": 0,
                "internal_weight": 100,
                "internal_count": 100,
                "left_child": {
                    "split_index": 1,
                    "split_feature": 1,
                    "split_gain": 30.125,
                    "threshold": 52000.75,
                    "decision_type": "<=",
                    "default_left": true,
                    "missing_type": "None",
                    "internal_value": -0.25,
                    "internal_weight": 60,
                    "internal_count": 60,
                    "left_child": {"leaf_index": 0, "leaf_value": -0.5, "leaf_weight": 20, "leaf_count": 20},
                    "right_child": {"leaf_index": 1, "leaf_value": -0.125, "leaf_weight": 40, "leaf_count": 40}
                },
                "right_child": {
                    "split_index": 2,
                    "split_feature": 2,
                    "split_gain": 12.0,
                    "threshold": "1||4",
                    "decision_type": "==",
                    "default_left": false,
                    "missing_type": "None",
                    "internal_value": 0.375,
                    "internal_weight": 40,
                    "internal_count": 40,
                    "left_child": {"leaf_index": 2, "leaf_value": 0.75, "leaf_weight": 10, "leaf_count": 10},
                    "right_child": {"leaf_index": 3, "leaf_value": 0.25, "leaf_weight": 30, "leaf_count": 30}
                }
            }
        },
        {
            "tree_index": 1,
            "num_leaves": 2,
            "num_cat": 0,
            "shrinkage": 0.1,
            "tree_structure": {
                "split_index": 0,
                "split_feature": 2,
                "threshold": 3,
                "decision_type": "<=",
                "internal_count": 100,
                "left_child": {"leaf_index": 0, "leaf_value": 0.01, "leaf_count": 70},
                "right_child": {"leaf_index": 1, "leaf_value": -0.02, "leaf_count": 30}
            }
        },
        {
            "tree_index": 2,
            "num_leaves": 1,
            "num_cat": 0,
            "shrinkage": 1,
            "tree_structure": {"leaf_value": 0.42}
        }
    ]
}"#;

/// Booster over [`STUMP_DUMP`].
pub fn stump_booster() -> Booster {
    Booster::from_json_str(STUMP_DUMP).expect("stump fixture parses")
}

/// Booster over [`FOREST_DUMP`].
pub fn forest_booster() -> Booster {
    Booster::from_json_str(FOREST_DUMP).expect("forest fixture parses")
}

/// Write a dump to `dir/name` and return its path.
pub fn write_dump<P: AsRef<Path>>(dir: P, name: &str, json: &str) -> PathBuf {
    let path = dir.as_ref().join(name);
    fs::write(&path, json).expect("write dump fixture");
    path
}

/// Label text of node `id`.
pub fn label_of(graph: &Digraph, id: &str) -> String {
    graph
        .node(id)
        .and_then(|node| node.label.as_ref())
        .map(|label| label.as_str().to_string())
        .unwrap_or_else(|| panic!("node {} has no label", id))
}

/// Config showing every statistic at the given precision.
pub fn config_with_all_info(precision: Option<usize>) -> PlotConfig {
    PlotConfigBuilder::new()
        .show_info(ShowInfo::ALL)
        .precision(precision)
        .build()
        .expect("valid config")
}

/// Extract the `<pct>% of data` values of a label.
pub fn percentages(label: &str) -> Vec<f64> {
    label
        .split("<br/>")
        .filter_map(|line| line.strip_suffix("% of data"))
        .map(|pct| pct.parse().expect("percentage is numeric"))
        .collect()
}

/// Dump of one tree that is a chain of `depth` splits, each with a leaf on
/// its yes side and the rest of the chain on its no side.
pub fn chain_dump(depth: usize) -> String {
    let mut node = format!(
        r#"{{"leaf_index": {}, "leaf_value": -0.5, "leaf_count": 1}}"#,
        depth
    );
    for split in (0..depth).rev() {
        node = format!(
            r#"{{"split_index": {split}, "split_feature": 0, "split_gain": 1.0,
                "threshold": {split}.5, "decision_type": "<=", "internal_count": {count},
                "left_child": {{"leaf_index": {split}, "leaf_value": 0.5, "leaf_count": 1}},
                "right_child": {node}}}"#,
            split = split,
            count = depth - split + 1,
            node = node
        );
    }
    format!(
        r#"{{"name": "tree", "tree_info": [{{"tree_index": 0, "num_leaves": {}, "tree_structure": {}}}]}}"#,
        depth + 1,
        node
    )
}
