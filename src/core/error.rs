//! Error handling and error types for LightGBM tree plotting.
//!
//! Every failure in the crate is surfaced as a [`PlotError`]. Errors are
//! raised immediately and propagated to the caller with `?`; no partial graph
//! is ever returned alongside an error.

use std::io;
use thiserror::Error;

/// Main error type for the tree plotting library.
#[derive(Error, Debug)]
pub enum PlotError {
    /// A split node carries a comparison operator other than `<=` or `==`
    #[error("Invalid decision type in tree model: {decision_type:?} at split {split_index}")]
    InvalidDecisionType {
        /// Operator found in the dump
        decision_type: String,
        /// Split that carried it
        split_index: usize,
    },

    /// The root node has no sample count, i.e. the tree has no split
    #[error("Cannot plot trees with no split")]
    EmptyTree,

    /// The object handed to the plotting entry points is not a usable model
    #[error("Invalid argument type: {message}")]
    InvalidArgumentType {
        /// What was expected and what was received
        message: String,
    },

    /// The requested tree does not exist in the ensemble
    #[error("tree_index is out of range: index {index}, number of trees {length}")]
    IndexOutOfRange {
        /// Requested tree index
        index: usize,
        /// Number of trees in the dump
        length: usize,
    },

    /// Feature names were supplied but do not cover a split's feature
    #[error("No feature name for feature {feature}: only {available} names available")]
    MissingFeatureName {
        /// Feature index used by the split
        feature: usize,
        /// Number of feature names supplied
        available: usize,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration loading errors
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// The external layout engine failed
    #[error("Render error: {message}")]
    Render {
        /// Engine exit status and diagnostics
        message: String,
    },

    /// File and process I/O errors
    #[error("I/O error: {source}")]
    Io {
        /// Underlying error
        #[from]
        source: io::Error,
    },

    /// JSON parsing errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying error
        #[from]
        source: serde_json::Error,
    },

    /// Image decoding and encoding errors
    #[error("Image error: {source}")]
    Image {
        /// Underlying error
        #[from]
        source: image::ImageError,
    },
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;

impl PlotError {
    /// Create an invalid decision type error
    pub fn invalid_decision_type<S: Into<String>>(decision_type: S, split_index: usize) -> Self {
        PlotError::InvalidDecisionType {
            decision_type: decision_type.into(),
            split_index,
        }
    }

    /// Create an invalid argument type error
    pub fn invalid_argument_type<S: Into<String>>(message: S) -> Self {
        PlotError::InvalidArgumentType {
            message: message.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, length: usize) -> Self {
        PlotError::IndexOutOfRange { index, length }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        PlotError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        PlotError::Config {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        PlotError::Render {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            PlotError::InvalidDecisionType { .. } => "invalid_decision_type",
            PlotError::EmptyTree => "empty_tree",
            PlotError::InvalidArgumentType { .. } => "invalid_argument_type",
            PlotError::IndexOutOfRange { .. } => "index_out_of_range",
            PlotError::MissingFeatureName { .. } => "missing_feature_name",
            PlotError::InvalidParameter { .. } => "invalid_parameter",
            PlotError::Config { .. } => "config",
            PlotError::Render { .. } => "render",
            PlotError::Io { .. } => "io",
            PlotError::Json { .. } => "json",
            PlotError::Image { .. } => "image",
        }
    }
}

/// Convenience macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::PlotError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::PlotError::config(format!($fmt, $($arg)*))
    };
}
