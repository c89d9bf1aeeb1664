//! Plot configuration structure and builder.
//!
//! [`PlotConfig`] gathers every knob of the plotting pipeline: which node
//! statistics to print, numeric precision, layout orientation, figure sizing
//! and the layout engine to invoke. It can be assembled with
//! [`PlotConfigBuilder`], loaded from a JSON or TOML file, or overridden from
//! `LGBM_PLOT_*` environment variables.

use crate::core::constants::*;
use crate::core::error::{PlotError, Result};
use crate::core::types::*;
use crate::plotting::surface::canvas_size;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure for tree plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Statistics appended to node labels
    pub show_info: Vec<ShowInfo>,
    /// Decimals for floating point values (None = no rounding, `"none"` in files)
    #[serde(with = "precision_repr")]
    pub precision: Option<usize>,
    /// Layout direction of the tree
    pub orientation: Orientation,

    /// Figure size in inches (None = default figure size)
    pub figsize: Option<(f64, f64)>,
    /// Figure resolution (None = default resolution)
    pub dpi: Option<u32>,
    /// Format requested from the layout engine
    pub format: ImageFormat,
    /// Path or name of the Graphviz `dot` binary
    pub dot_binary: String,

    /// Name of the emitted digraph
    pub graph_name: Option<String>,
    /// Comment line emitted before the digraph
    pub comment: Option<String>,
    /// Extra graph attributes; layout attributes set by the renderer win
    pub graph_attr: BTreeMap<String, String>,
    /// Default attributes for every node
    pub node_attr: BTreeMap<String, String>,
    /// Default attributes for every edge
    pub edge_attr: BTreeMap<String, String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            show_info: Vec::new(),
            precision: Some(DEFAULT_PRECISION),
            orientation: Orientation::Horizontal,

            figsize: None,
            dpi: None,
            format: ImageFormat::Png,
            dot_binary: DEFAULT_DOT_BINARY.to_string(),

            graph_name: None,
            comment: None,
            graph_attr: BTreeMap::new(),
            node_attr: BTreeMap::new(),
            edge_attr: BTreeMap::new(),
        }
    }
}

impl PlotConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given statistic was requested.
    pub fn shows(&self, info: ShowInfo) -> bool {
        self.show_info.contains(&info)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if let Some(dpi) = self.dpi {
            if dpi == 0 || dpi > MAX_DPI {
                return Err(PlotError::invalid_parameter(
                    "dpi",
                    dpi.to_string(),
                    format!("must be in range [1, {}]", MAX_DPI),
                ));
            }
        }

        if let Some(figsize) = self.figsize {
            canvas_size(figsize, self.dpi.unwrap_or(DEFAULT_DPI))?;
        }

        if self.dot_binary.trim().is_empty() {
            return Err(PlotError::invalid_parameter(
                "dot_binary",
                "",
                "must name the Graphviz executable",
            ));
        }

        for (i, info) in self.show_info.iter().enumerate() {
            if self.show_info[..i].contains(info) {
                log::warn!("show_info lists {} more than once", info);
            }
        }

        Ok(())
    }

    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlotError::config(format!("Failed to read config file: {}", e)))?;

        let config: PlotConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| PlotError::config(format!("Failed to parse JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| PlotError::config(format!("Failed to parse TOML config: {}", e)))?,
            _ => {
                return Err(PlotError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| PlotError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| PlotError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(PlotError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| PlotError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = PlotConfig::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply `LGBM_PLOT_*` environment variables on top of this configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LGBM_PLOT_PRECISION") {
            self.precision = parse_precision(&val)
                .map_err(|_| PlotError::config("Invalid LGBM_PLOT_PRECISION"))?;
        }

        if let Ok(val) = std::env::var("LGBM_PLOT_ORIENTATION") {
            self.orientation = val
                .parse()
                .map_err(|_| PlotError::config("Invalid LGBM_PLOT_ORIENTATION"))?;
        }

        if let Ok(val) = std::env::var("LGBM_PLOT_SHOW_INFO") {
            self.show_info = parse_show_info_list(&val)
                .map_err(|_| PlotError::config("Invalid LGBM_PLOT_SHOW_INFO"))?;
        }

        if let Ok(val) = std::env::var("LGBM_PLOT_DOT") {
            self.dot_binary = val;
        }

        self.validate()
    }
}

/// Parse a precision value; `none` (any case) or an empty string means no rounding.
pub fn parse_precision(raw: &str) -> Result<Option<usize>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed
        .parse::<usize>()
        .map(Some)
        .map_err(|_| PlotError::invalid_parameter("precision", raw, "must be a non-negative integer or 'none'"))
}

/// File representation of `precision`: an integer, or `"none"` since TOML
/// has no null.
mod precision_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Digits(usize),
        Text(String),
    }

    pub(super) fn serialize<S: Serializer>(
        precision: &Option<usize>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match precision {
            Some(digits) => serializer.serialize_u64(*digits as u64),
            None => serializer.serialize_str("none"),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<usize>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Digits(digits)) => Ok(Some(digits)),
            Some(Repr::Text(text)) => {
                super::parse_precision(&text).map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Parse a comma separated list of statistic names.
pub fn parse_show_info_list(raw: &str) -> Result<Vec<ShowInfo>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// Builder for [`PlotConfig`]
#[derive(Debug)]
pub struct PlotConfigBuilder {
    config: PlotConfig,
    validation_errors: Vec<String>,
}

impl PlotConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        PlotConfigBuilder {
            config: PlotConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the statistics shown in node labels
    pub fn show_info<I>(mut self, info: I) -> Self
    where
        I: IntoIterator<Item = ShowInfo>,
    {
        self.config.show_info = info.into_iter().collect();
        self
    }

    /// Set the statistics shown in node labels from their dump names
    pub fn show_info_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for name in names {
            match name.as_ref().parse::<ShowInfo>() {
                Ok(info) => parsed.push(info),
                Err(_) => self
                    .validation_errors
                    .push(format!("unknown show_info entry '{}'", name.as_ref())),
            }
        }
        self.config.show_info = parsed;
        self
    }

    /// Set the number of decimals (None = no rounding)
    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.config.precision = precision;
        self
    }

    /// Set the layout orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Set the figure size in inches
    pub fn figsize(mut self, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            self.validation_errors
                .push("figsize dimensions must be positive".to_string());
        }
        self.config.figsize = Some((width, height));
        self
    }

    /// Set the figure resolution
    pub fn dpi(mut self, dpi: u32) -> Self {
        if dpi == 0 {
            self.validation_errors.push("dpi must be positive".to_string());
        }
        self.config.dpi = Some(dpi);
        self
    }

    /// Set the layout engine output format
    pub fn format(mut self, format: ImageFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the Graphviz binary
    pub fn dot_binary<S: Into<String>>(mut self, binary: S) -> Self {
        self.config.dot_binary = binary.into();
        self
    }

    /// Set the digraph name
    pub fn graph_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.graph_name = Some(name.into());
        self
    }

    /// Set the leading comment
    pub fn comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.config.comment = Some(comment.into());
        self
    }

    /// Add a graph attribute
    pub fn graph_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.graph_attr.insert(key.into(), value.into());
        self
    }

    /// Add a default node attribute
    pub fn node_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.node_attr.insert(key.into(), value.into());
        self
    }

    /// Add a default edge attribute
    pub fn edge_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.edge_attr.insert(key.into(), value.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PlotConfig> {
        if !self.validation_errors.is_empty() {
            return Err(PlotError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PlotConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PlotConfig::default();
        assert!(config.show_info.is_empty());
        assert_eq!(config.precision, Some(3));
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.dot_binary, "dot");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PlotConfigBuilder::new()
            .show_info([ShowInfo::SplitGain, ShowInfo::LeafCount])
            .precision(None)
            .orientation(Orientation::Vertical)
            .figsize(5.0, 5.0)
            .dpi(400)
            .graph_attr("bgcolor", "white")
            .build()
            .unwrap();

        assert!(config.shows(ShowInfo::SplitGain));
        assert!(!config.shows(ShowInfo::InternalCount));
        assert_eq!(config.precision, None);
        assert_eq!(config.figsize, Some((5.0, 5.0)));
        assert_eq!(config.dpi, Some(400));
        assert_eq!(config.graph_attr.get("bgcolor").map(String::as_str), Some("white"));
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(PlotConfigBuilder::new().dpi(0).build().is_err());
        assert!(PlotConfigBuilder::new().figsize(-1.0, 2.0).build().is_err());
        assert!(PlotConfigBuilder::new().dot_binary("  ").build().is_err());

        let err = PlotConfigBuilder::new()
            .show_info_names(["split_gain", "leaf_depth"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("leaf_depth"));
    }

    #[test]
    fn test_validate_dpi_range() {
        let mut config = PlotConfig::default();
        config.dpi = Some(MAX_DPI + 1);
        assert!(config.validate().is_err());
        config.dpi = Some(MAX_DPI);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_canvas_limit() {
        let err = PlotConfigBuilder::new().figsize(1e9, 1e9).dpi(100).build().unwrap_err();
        assert!(matches!(err, PlotError::InvalidParameter { .. }));

        // without a dpi the default resolution applies
        let mut config = PlotConfig::default();
        config.figsize = Some((700.0, 1.0));
        assert!(config.validate().is_err());
        config.dpi = Some(50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision("4").unwrap(), Some(4));
        assert_eq!(parse_precision("None").unwrap(), None);
        assert_eq!(parse_precision("").unwrap(), None);
        assert!(parse_precision("-2").is_err());
    }

    #[test]
    fn test_parse_show_info_list() {
        let infos = parse_show_info_list("split_gain, data_percentage,").unwrap();
        assert_eq!(infos, vec![ShowInfo::SplitGain, ShowInfo::DataPercentage]);
        assert!(parse_show_info_list("split_gain,bogus").is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = PlotConfigBuilder::new()
            .show_info([ShowInfo::InternalCount])
            .orientation(Orientation::Vertical)
            .build()
            .unwrap();

        for name in ["plot.json", "plot.toml"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            let loaded = PlotConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }

        let unrounded = PlotConfigBuilder::new().precision(None).build().unwrap();
        for name in ["unrounded.json", "unrounded.toml"] {
            let path = dir.path().join(name);
            unrounded.save_to_file(&path).unwrap();
            assert_eq!(PlotConfig::load_from_file(&path).unwrap().precision, None);
        }

        let bad = dir.path().join("plot.yaml");
        assert!(config.save_to_file(&bad).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "orientation = \"vertical\"\nshow_info = [\"leaf_count\"]\n").unwrap();

        let config = PlotConfig::load_from_file(&path).unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.show_info, vec![ShowInfo::LeafCount]);
        assert_eq!(config.precision, Some(DEFAULT_PRECISION));
    }
}
