//! Configuration management for tree plotting.
//!
//! Configuration layers, lowest precedence first: defaults, a `.json` or
//! `.toml` file, `LGBM_PLOT_*` environment variables, explicit builder calls.

pub mod core;

pub use self::core::{parse_precision, parse_show_info_list, PlotConfig, PlotConfigBuilder};

/// Configuration file looked up by the command line tool when none is given
pub const DEFAULT_CONFIG_FILE: &str = "lgbm-plot.toml";
