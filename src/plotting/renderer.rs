//! Conversion of one dumped tree into a styled [`Digraph`].
//!
//! The walk is depth-first and pre-order: a split is emitted, then its
//! yes-subtree, then its no-subtree, and only then the edge from its parent.
//! The root's sample count is read once and threaded through the walk as the
//! denominator of every `data_percentage` line.

use crate::config::PlotConfig;
use crate::core::constants::*;
use crate::core::error::{PlotError, Result};
use crate::core::types::{DataCount, NodeIndex, ShowInfo};
use crate::graph::{Digraph, GraphEdge, GraphNode, Label};
use crate::io::dump::DumpNode;
use crate::plotting::format::{escape_html, format_percentage, format_threshold, format_value};
use crate::plotting::legend::legend_node;
use crate::tree::{ArenaNode, Branch, LeafData, NodeKind, SplitData, TreeArena};

/// Converts dumped trees into graphs according to a [`PlotConfig`].
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    config: &'a PlotConfig,
    feature_names: Option<&'a [String]>,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer; features are labeled `feature N` until names are set.
    pub fn new(config: &'a PlotConfig) -> Self {
        TreeRenderer {
            config,
            feature_names: None,
        }
    }

    /// Use display names for split features, indexed by feature index.
    pub fn with_feature_names(mut self, feature_names: Option<&'a [String]>) -> Self {
        self.feature_names = feature_names;
        self
    }

    /// Convert a tree rooted at `root` into a graph.
    ///
    /// Fails with [`PlotError::EmptyTree`] before emitting anything when the
    /// root has no sample count, and with
    /// [`PlotError::InvalidDecisionType`] on an unknown split operator.
    pub fn convert(&self, root: &DumpNode) -> Result<Digraph> {
        let total_count = match root {
            DumpNode::Split(split) => split.internal_count,
            DumpNode::Leaf(_) => None,
        };
        let total_count = match total_count {
            Some(count) if count > 0 => count,
            _ => return Err(PlotError::EmptyTree),
        };

        let arena = TreeArena::from_dump(root)?;
        let mut graph = self.empty_graph();
        self.add(&arena, TreeArena::ROOT, total_count, true, &mut graph)?;
        graph.add_node(legend_node());

        log::debug!(
            "converted tree with {} splits and {} leaves into {} graph nodes",
            arena.num_splits(),
            arena.num_leaves(),
            graph.node_count()
        );
        Ok(graph)
    }

    fn empty_graph(&self) -> Digraph {
        let mut graph = Digraph::new();
        if let Some(name) = &self.config.graph_name {
            graph = graph.with_name(name.clone());
        }
        if let Some(comment) = &self.config.comment {
            graph = graph.with_comment(comment.clone());
        }
        for (key, value) in &self.config.graph_attr {
            graph.set_graph_attr(key.clone(), value.clone());
        }
        for (key, value) in &self.config.node_attr {
            graph.set_node_attr(key.clone(), value.clone());
        }
        for (key, value) in &self.config.edge_attr {
            graph.set_edge_attr(key.clone(), value.clone());
        }
        graph.set_graph_attr("nodesep", GRAPH_NODESEP);
        graph.set_graph_attr("ranksep", GRAPH_RANKSEP);
        graph.set_graph_attr("rankdir", self.config.orientation.rankdir());
        graph
    }

    fn add(
        &self,
        arena: &TreeArena,
        index: NodeIndex,
        total_count: DataCount,
        first_node: bool,
        graph: &mut Digraph,
    ) -> Result<()> {
        let node = arena.node(index).ok_or_else(|| {
            PlotError::invalid_parameter("tree_structure", index.to_string(), "dangling child link")
        })?;
        let name = node.id();

        match node.kind() {
            NodeKind::Split(split) => {
                let (fillcolor, style) = split_fill(node.branch(), first_node);
                graph.add_node(
                    GraphNode::new(name.clone())
                        .label(Label::Html(self.split_label(split, total_count)?))
                        .attr("shape", "rectangle")
                        .attr("style", style)
                        .attr("fillcolor", fillcolor),
                );
                self.add(arena, split.left_child, total_count, false, graph)?;
                self.add(arena, split.right_child, total_count, false, graph)?;
            }
            NodeKind::Leaf(leaf) => {
                graph.add_node(
                    GraphNode::new(name.clone())
                        .label(Label::Html(self.leaf_label(leaf, total_count)))
                        .attr("style", "filled")
                        .attr("fillcolor", LEAF_FILL_COLOR),
                );
            }
        }

        if let Some(parent) = node.parent().and_then(|parent| arena.node(parent)) {
            graph.add_edge(branch_edge(parent, node, name));
        }
        Ok(())
    }

    fn feature_label(&self, split: &SplitData) -> Result<String> {
        match self.feature_names {
            Some(names) => {
                let name = names.get(split.split_feature).ok_or(PlotError::MissingFeatureName {
                    feature: split.split_feature,
                    available: names.len(),
                })?;
                Ok(format!("<B>{}</B>", escape_html(name)))
            }
            None => Ok(format!("feature <B>{}</B>", split.split_feature)),
        }
    }

    fn split_label(&self, split: &SplitData, total_count: DataCount) -> Result<String> {
        let precision = self.config.precision;
        let mut label = format!(
            "{} {} <B>{}</B>",
            self.feature_label(split)?,
            split.decision_type.symbol(),
            format_threshold(&split.threshold, precision)
        );

        let floats = [
            (ShowInfo::SplitGain, split.split_gain),
            (ShowInfo::InternalValue, split.internal_value),
            (ShowInfo::InternalWeight, split.internal_weight),
        ];
        for (info, value) in floats {
            if !self.config.shows(info) {
                continue;
            }
            match value {
                Some(value) => label.push_str(&format!(
                    "<br/>{} {}",
                    format_value(value, precision),
                    info.suffix()
                )),
                None => missing_statistic(info, split.split_index),
            }
        }

        if self.config.shows(ShowInfo::InternalCount) {
            match split.internal_count {
                Some(count) => label.push_str(&format!("<br/>count: {}", count)),
                None => missing_statistic(ShowInfo::InternalCount, split.split_index),
            }
        }

        if self.config.shows(ShowInfo::DataPercentage) {
            match split.internal_count {
                Some(count) => label.push_str(&format!(
                    "<br/>{}% of data",
                    format_percentage(count, total_count)
                )),
                None => missing_statistic(ShowInfo::DataPercentage, split.split_index),
            }
        }

        Ok(label)
    }

    fn leaf_label(&self, leaf: &LeafData, total_count: DataCount) -> String {
        let precision = self.config.precision;
        let mut label = format!(
            "leaf {}: <B>{}</B>",
            leaf.leaf_index,
            format_value(leaf.leaf_value, precision)
        );

        if self.config.shows(ShowInfo::LeafWeight) {
            match leaf.leaf_weight {
                Some(weight) => {
                    label.push_str(&format!("<br/>{} weight", format_value(weight, precision)))
                }
                None => missing_statistic(ShowInfo::LeafWeight, leaf.leaf_index),
            }
        }

        if self.config.shows(ShowInfo::LeafCount) {
            match leaf.leaf_count {
                Some(count) => label.push_str(&format!("<br/>count: {}", count)),
                None => missing_statistic(ShowInfo::LeafCount, leaf.leaf_index),
            }
        }

        if self.config.shows(ShowInfo::DataPercentage) {
            match leaf.leaf_count {
                Some(count) => label.push_str(&format!(
                    "<br/>{}% of data",
                    format_percentage(count, total_count)
                )),
                None => missing_statistic(ShowInfo::DataPercentage, leaf.leaf_index),
            }
        }

        label
    }
}

/// Fill color and style of a split.
///
/// `Branch::Root` carries no color flag, which leaves the split red and
/// unfilled unless it is the first node, which is always gray.
pub fn split_fill(branch: Branch, first_node: bool) -> (&'static str, &'static str) {
    if first_node {
        return (ROOT_FILL_COLOR, "filled");
    }
    match branch.as_flag() {
        Some(true) => (YES_FILL_COLOR, "filled"),
        Some(false) => (NO_FILL_COLOR, "filled"),
        None => (DEFAULT_SPLIT_FILL_COLOR, ""),
    }
}

fn branch_edge(parent: &ArenaNode, child: &ArenaNode, child_id: String) -> GraphEdge {
    let (caption, color) = match child.branch() {
        Branch::Yes => (YES_LABEL, YES_EDGE_COLOR),
        _ => (NO_LABEL, NO_EDGE_COLOR),
    };
    GraphEdge::new(parent.id(), child_id)
        .label(Label::Text(caption.to_string()))
        .attr("color", color)
}

fn missing_statistic(info: ShowInfo, index: usize) {
    log::warn!("{} requested but not present in the dump for node {}", info, index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfigBuilder;
    use crate::core::types::Orientation;

    fn stump(decision_type: &str) -> DumpNode {
        serde_json::from_str(&format!(
            r#"{{
                "split_index": 0, "split_feature": 1, "split_gain": 12.3456,
                "threshold": 17.5, "decision_type": "{}",
                "internal_value": 0.1, "internal_weight": 50.0, "internal_count": 200,
                "left_child": {{"leaf_index": 0, "leaf_value": 0.25, "leaf_weight": 30.5, "leaf_count": 50}},
                "right_child": {{"leaf_index": 1, "leaf_value": -0.5, "leaf_weight": 19.5, "leaf_count": 150}}
            }}"#,
            decision_type
        ))
        .unwrap()
    }

    #[test]
    fn test_stump_shape() {
        let config = PlotConfig::default();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();

        assert_eq!(graph.node_count(), 4);
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["split0", "leaf0", "leaf1", "legend"]);

        assert_eq!(graph.edge_count(), 2);
        let yes = graph.edge("split0", "leaf0").unwrap();
        assert_eq!(yes.label, Some(Label::Text("yes".into())));
        assert_eq!(yes.color(), Some("green"));
        let no = graph.edge("split0", "leaf1").unwrap();
        assert_eq!(no.label, Some(Label::Text("no".into())));
        assert_eq!(no.color(), Some("red"));
    }

    #[test]
    fn test_root_is_gray() {
        let config = PlotConfig::default();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();
        let root = graph.node("split0").unwrap();
        assert_eq!(root.fillcolor(), Some("#dddddd"));
        assert_eq!(root.get("style"), Some("filled"));
        assert_eq!(root.get("shape"), Some("rectangle"));
    }

    #[test]
    fn test_split_label_default_names() {
        let config = PlotConfig::default();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();
        let label = graph.node("split0").unwrap().label.clone().unwrap();
        assert_eq!(label.as_str(), "feature <B>1</B> ≤ <B>17.500</B>");
    }

    #[test]
    fn test_categorical_operator() {
        let config = PlotConfig::default();
        let graph = TreeRenderer::new(&config).convert(&stump("==")).unwrap();
        let label = graph.node("split0").unwrap().label.clone().unwrap();
        assert!(label.as_str().contains(" = "));
        assert!(!label.as_str().contains('≤'));
    }

    #[test]
    fn test_invalid_operator() {
        let config = PlotConfig::default();
        let err = TreeRenderer::new(&config).convert(&stump(">=")).unwrap_err();
        assert!(matches!(err, PlotError::InvalidDecisionType { .. }));
    }

    #[test]
    fn test_feature_names() {
        let config = PlotConfig::default();
        let names = vec!["mean radius".to_string(), "a<b".to_string()];
        let graph = TreeRenderer::new(&config)
            .with_feature_names(Some(&names))
            .convert(&stump("<="))
            .unwrap();
        let label = graph.node("split0").unwrap().label.clone().unwrap();
        assert_eq!(label.as_str(), "<B>a&lt;b</B> ≤ <B>17.500</B>");

        let short = vec!["only".to_string()];
        let err = TreeRenderer::new(&config)
            .with_feature_names(Some(&short))
            .convert(&stump("<="))
            .unwrap_err();
        assert!(matches!(err, PlotError::MissingFeatureName { feature: 1, available: 1 }));
    }

    #[test]
    fn test_all_statistics() {
        let config = PlotConfigBuilder::new()
            .show_info(ShowInfo::ALL)
            .precision(Some(2))
            .build()
            .unwrap();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();

        let split = graph.node("split0").unwrap().label.clone().unwrap();
        assert_eq!(
            split.as_str(),
            "feature <B>1</B> ≤ <B>17.50</B><br/>12.35 gain<br/>0.10 value\
             <br/>50.00 weight<br/>count: 200<br/>100.00% of data"
        );

        let leaf = graph.node("leaf0").unwrap().label.clone().unwrap();
        assert_eq!(
            leaf.as_str(),
            "leaf 0: <B>0.25</B><br/>30.50 weight<br/>count: 50<br/>25.00% of data"
        );
    }

    #[test]
    fn test_no_rounding() {
        let config = PlotConfigBuilder::new().precision(None).build().unwrap();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();
        let leaf = graph.node("leaf1").unwrap().label.clone().unwrap();
        assert_eq!(leaf.as_str(), "leaf 1: <B>-0.5</B>");
        let split = graph.node("split0").unwrap().label.clone().unwrap();
        assert!(split.as_str().ends_with("<B>17.5</B>"));
    }

    #[test]
    fn test_leaf_style() {
        let config = PlotConfig::default();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();
        for id in ["leaf0", "leaf1"] {
            let leaf = graph.node(id).unwrap();
            assert_eq!(leaf.fillcolor(), Some("#ddddff"));
            assert_eq!(leaf.get("style"), Some("filled"));
            assert_eq!(leaf.get("shape"), None);
        }
    }

    #[test]
    fn test_empty_tree() {
        let config = PlotConfig::default();
        let leaf: DumpNode = serde_json::from_str(r#"{"leaf_value": 0.3}"#).unwrap();
        let err = TreeRenderer::new(&config).convert(&leaf).unwrap_err();
        assert!(matches!(err, PlotError::EmptyTree));

        let mut no_count = stump("<=");
        if let DumpNode::Split(split) = &mut no_count {
            split.internal_count = None;
        }
        let err = TreeRenderer::new(&config).convert(&no_count).unwrap_err();
        assert!(matches!(err, PlotError::EmptyTree));
    }

    #[test]
    fn test_empty_tree_checked_before_decision_type() {
        let config = PlotConfig::default();
        let mut tree = stump("!=");
        if let DumpNode::Split(split) = &mut tree {
            split.internal_count = None;
        }
        let err = TreeRenderer::new(&config).convert(&tree).unwrap_err();
        assert!(matches!(err, PlotError::EmptyTree));
    }

    #[test]
    fn test_orientation_and_graph_attrs() {
        let config = PlotConfigBuilder::new()
            .orientation(Orientation::Vertical)
            .graph_attr("rankdir", "RL")
            .graph_attr("bgcolor", "white")
            .node_attr("fontname", "Helvetica")
            .graph_name("tree0")
            .build()
            .unwrap();
        let graph = TreeRenderer::new(&config).convert(&stump("<=")).unwrap();

        let attrs = graph.graph_attr();
        assert_eq!(attrs.get("rankdir").map(String::as_str), Some("TB"));
        assert_eq!(attrs.get("nodesep").map(String::as_str), Some("0.05"));
        assert_eq!(attrs.get("ranksep").map(String::as_str), Some("0.3"));
        assert_eq!(attrs.get("bgcolor").map(String::as_str), Some("white"));
        assert_eq!(graph.node_attr().get("fontname").map(String::as_str), Some("Helvetica"));
        assert_eq!(graph.name(), Some("tree0"));
    }

    #[test]
    fn test_split_fill_rules() {
        assert_eq!(split_fill(Branch::Yes, false), ("#ddffdd", "filled"));
        assert_eq!(split_fill(Branch::No, false), ("#ffdddd", "filled"));
        assert_eq!(split_fill(Branch::Root, false), ("red", ""));
        assert_eq!(split_fill(Branch::Yes, true), ("#dddddd", "filled"));
        assert_eq!(split_fill(Branch::Root, true), ("#dddddd", "filled"));
    }
}
