//! # LightGBM tree plotting
//!
//! Renders one decision tree of a trained LightGBM ensemble as a labeled
//! directed graph. The input is the model dump (the JSON produced by
//! `Booster::dump_model`); the output is a Graphviz graph, DOT source, PNG
//! bytes, or a pixel surface holding the rasterized tree.
//!
//! ## Features
//!
//! - **Dump reading**: Typed serde model of `tree_info[*].tree_structure`,
//!   numeric and categorical thresholds, optional statistics.
//! - **Graph conversion**: Deterministic pre-order walk producing split and
//!   leaf nodes, yes/no edges, configurable statistics and rounding.
//! - **Rasterization**: DOT piped through the Graphviz `dot` engine, PNG
//!   decoded through the `image` crate.
//! - **Configuration**: Builder, JSON/TOML files and `LGBM_PLOT_*`
//!   environment overrides.
//!
//! ## Quick Start
//!
//! ```rust
//! use lightgbm_treeplot::{create_tree_digraph, Booster, PlotConfigBuilder, ShowInfo};
//!
//! # fn main() -> lightgbm_treeplot::Result<()> {
//! let booster = Booster::from_json_str(r#"{
//!     "feature_names": ["age", "income"],
//!     "tree_info": [{"tree_index": 0, "tree_structure": {
//!         "split_index": 0, "split_feature": 0, "threshold": 42.5,
//!         "decision_type": "<=", "internal_count": 200,
//!         "left_child": {"leaf_index": 0, "leaf_value": -0.1, "leaf_count": 50},
//!         "right_child": {"leaf_index": 1, "leaf_value": 0.3, "leaf_count": 150}
//!     }}]
//! }"#)?;
//!
//! let config = PlotConfigBuilder::new()
//!     .show_info([ShowInfo::LeafCount, ShowInfo::DataPercentage])
//!     .precision(Some(2))
//!     .build()?;
//!
//! let graph = create_tree_digraph(&booster, 0, &config)?;
//! assert_eq!(graph.edge_count(), 2);
//! assert!(graph.to_dot().contains("25.00% of data"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Plotting onto a surface
//!
//! ```rust,no_run
//! use lightgbm_treeplot::{plot_tree, Booster, GraphvizRasterizer, PlotConfig};
//!
//! # fn main() -> lightgbm_treeplot::Result<()> {
//! let booster = Booster::from_json_file("model.json")?;
//! let config = PlotConfig::load_from_environment()?;
//! let rasterizer = GraphvizRasterizer::from_config(&config);
//!
//! let surface = plot_tree(&booster, None, 0, &config, &rasterizer)?;
//! surface.save_png("tree.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`core`]: Errors, constants, shared types, logging
//! - [`config`]: Plot configuration
//! - [`io`]: Model dump types and model handles
//! - [`tree`]: Arena form of a single tree
//! - [`graph`]: The rendered graph and DOT output
//! - [`plotting`]: Conversion, rasterization and plot surfaces

#![doc(html_root_url = "https://docs.rs/lightgbm-treeplot/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Model dump input
pub mod io;

// Tree arena
pub mod tree;

// Rendered graph
pub mod graph;

// Conversion and rasterization
pub mod plotting;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{PlotError, Result},
    initialize_logging,
    types::*,
};

pub use crate::config::{PlotConfig, PlotConfigBuilder};
pub use crate::graph::{Digraph, GraphEdge, GraphNode, Label};
pub use crate::io::{Booster, DumpNode, DumpSource, LGBMModel, ModelDump, Threshold};
pub use crate::plotting::{
    create_tree_digraph, plot_tree, rasterize, GraphvizRasterizer, PixelBuffer, PlotSurface,
    Rasterizer, TreeRenderer,
};
pub use crate::tree::TreeArena;

// Version information
pub use crate::core::constants::LGBM_TREEPLOT_VERSION as VERSION;

/// Initialize the library.
///
/// Installs the `env_logger` backend (honoring `RUST_LOG`, defaulting to
/// `info`). Optional: every entry point works without it, log output is
/// simply dropped.
///
/// ```rust
/// fn main() -> lightgbm_treeplot::Result<()> {
///     lightgbm_treeplot::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
