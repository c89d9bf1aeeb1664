//! Core data types for LightGBM tree plotting.
//!
//! These enums are the vocabulary shared between configuration, the tree
//! arena and the renderer. Each one parses from and prints as the lowercase
//! names LightGBM itself uses.

use crate::core::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feature index type for identifying features in the dataset.
pub type FeatureIndex = usize;

/// Position of a node inside a [`TreeArena`](crate::tree::TreeArena).
pub type NodeIndex = usize;

/// Number of training records that reached a node.
pub type DataCount = u64;

/// Layout direction of the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right (`rankdir=LR`)
    Horizontal,
    /// Top to bottom (`rankdir=TB`)
    Vertical,
}

impl Orientation {
    /// Graphviz `rankdir` value for this orientation.
    pub fn rankdir(self) -> &'static str {
        match self {
            Orientation::Horizontal => "LR",
            Orientation::Vertical => "TB",
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Horizontal
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            _ => Err(PlotError::invalid_parameter(
                "orientation",
                s,
                "must be 'horizontal' or 'vertical'",
            )),
        }
    }
}

/// Optional per-node statistic that can be appended to a node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowInfo {
    /// Gain from adding this split to the model
    SplitGain,
    /// Raw value the node would predict if it were a leaf
    InternalValue,
    /// Total weight of the records reaching a split
    InternalWeight,
    /// Number of records reaching a split
    InternalCount,
    /// Number of records reaching a leaf
    LeafCount,
    /// Sum of hessians of the records reaching a leaf
    LeafWeight,
    /// Share of the root's records reaching this node
    DataPercentage,
}

impl ShowInfo {
    /// All statistics, in label order.
    pub const ALL: [ShowInfo; 7] = [
        ShowInfo::SplitGain,
        ShowInfo::InternalValue,
        ShowInfo::InternalWeight,
        ShowInfo::InternalCount,
        ShowInfo::LeafCount,
        ShowInfo::LeafWeight,
        ShowInfo::DataPercentage,
    ];

    /// Dump field name of the statistic.
    pub fn as_str(self) -> &'static str {
        match self {
            ShowInfo::SplitGain => "split_gain",
            ShowInfo::InternalValue => "internal_value",
            ShowInfo::InternalWeight => "internal_weight",
            ShowInfo::InternalCount => "internal_count",
            ShowInfo::LeafCount => "leaf_count",
            ShowInfo::LeafWeight => "leaf_weight",
            ShowInfo::DataPercentage => "data_percentage",
        }
    }

    /// Word printed after a value in a label, the last `_` segment of the name.
    pub fn suffix(self) -> &'static str {
        let name = self.as_str();
        match name.rfind('_') {
            Some(pos) => &name[pos + 1..],
            None => name,
        }
    }
}

impl fmt::Display for ShowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShowInfo {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        ShowInfo::ALL
            .iter()
            .copied()
            .find(|info| info.as_str() == s)
            .ok_or_else(|| {
                PlotError::invalid_parameter(
                    "show_info",
                    s,
                    "must be one of split_gain, internal_value, internal_weight, \
                     internal_count, leaf_count, leaf_weight, data_percentage",
                )
            })
    }
}

/// Comparison operator used at a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionType {
    /// Numerical split, `value <= threshold` goes left
    LessOrEqual,
    /// Categorical split, `value in threshold set` goes left
    Equal,
}

impl DecisionType {
    /// Symbol shown in split labels.
    pub fn symbol(self) -> &'static str {
        match self {
            DecisionType::LessOrEqual => "\u{2264}",
            DecisionType::Equal => "=",
        }
    }

    /// Parse the operator stored in a dump, reporting the split it came from.
    pub fn parse(raw: &str, split_index: usize) -> Result<Self> {
        match raw {
            "<=" => Ok(DecisionType::LessOrEqual),
            "==" => Ok(DecisionType::Equal),
            other => Err(PlotError::invalid_decision_type(other, split_index)),
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionType::LessOrEqual => write!(f, "<="),
            DecisionType::Equal => write!(f, "=="),
        }
    }
}

/// Output format requested from the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster PNG
    Png,
    /// Vector SVG
    Svg,
    /// Graphviz source, no engine involved
    Dot,
}

impl ImageFormat {
    /// Format name passed to `dot -T`.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Dot => "dot",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "dot" | "gv" => Ok(ImageFormat::Dot),
            _ => Err(PlotError::invalid_parameter(
                "format",
                s,
                "must be one of png, svg, dot",
            )),
        }
    }
}
