//! Fixed colors, graph attributes and defaults used when plotting trees.

/// Fill color of the root split.
pub const ROOT_FILL_COLOR: &str = "#dddddd";

/// Fill color of a split reached through a "yes" edge.
pub const YES_FILL_COLOR: &str = "#ddffdd";

/// Fill color of a split reached through a "no" edge.
pub const NO_FILL_COLOR: &str = "#ffdddd";

/// Fill color of every leaf.
pub const LEAF_FILL_COLOR: &str = "#ddddff";

/// Fill color of a split with no color override. Only reachable for a
/// split that is neither the root nor anybody's child.
pub const DEFAULT_SPLIT_FILL_COLOR: &str = "red";

/// Edge color for the left ("yes") branch.
pub const YES_EDGE_COLOR: &str = "green";

/// Edge color for the right ("no") branch.
pub const NO_EDGE_COLOR: &str = "red";

/// Caption of the left branch edge.
pub const YES_LABEL: &str = "yes";

/// Caption of the right branch edge.
pub const NO_LABEL: &str = "no";

/// Identifier of the legend node.
pub const LEGEND_NODE_ID: &str = "legend";

/// Graph-wide `nodesep` attribute.
pub const GRAPH_NODESEP: &str = "0.05";

/// Graph-wide `ranksep` attribute.
pub const GRAPH_RANKSEP: &str = "0.3";

/// Default number of decimals for floating point values.
pub const DEFAULT_PRECISION: usize = 3;

/// Decimals used for the `data_percentage` statistic regardless of precision.
pub const PERCENTAGE_PRECISION: usize = 2;

/// Default figure size in inches when none is given.
pub const DEFAULT_FIGSIZE: (f64, f64) = (6.4, 4.8);

/// Default figure resolution when none is given.
pub const DEFAULT_DPI: u32 = 100;

/// Upper bound on figure resolution accepted by configuration.
pub const MAX_DPI: u32 = 2400;

/// Largest figure canvas side in pixels.
pub const MAX_CANVAS_PIXELS_PER_SIDE: u32 = 1 << 16;

/// Name of the Graphviz layout engine binary.
pub const DEFAULT_DOT_BINARY: &str = "dot";

/// Crate version string.
pub const LGBM_TREEPLOT_VERSION: &str = env!("CARGO_PKG_VERSION");
