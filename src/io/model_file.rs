//! Model handles accepted by the plotting entry points.
//!
//! A [`Booster`] is the trained artifact: it owns a parsed [`ModelDump`].
//! An [`LGBMModel`] is the estimator-style wrapper that only holds a booster
//! once fitted. Anything implementing [`DumpSource`] can be plotted.

use crate::core::error::{PlotError, Result};
use crate::io::dump::ModelDump;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Source of a model dump.
///
/// Implementors unwrap whatever model representation they hold into the
/// dump the renderer walks, failing with
/// [`PlotError::InvalidArgumentType`] when they hold no usable model.
pub trait DumpSource {
    /// Produce the model dump.
    fn model_dump(&self) -> Result<Cow<'_, ModelDump>>;
}

/// Trained gradient boosted tree ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct Booster {
    dump: ModelDump,
}

impl Booster {
    /// Wrap an already parsed dump.
    pub fn from_dump(dump: ModelDump) -> Self {
        Booster { dump }
    }

    /// Parse a dump from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_dump(ModelDump::from_json_str(json)?))
    }

    /// Read a dump from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let dump = ModelDump::from_json_reader(reader)?;
        log::debug!(
            "loaded model dump from {} with {} trees",
            path.display(),
            dump.num_trees()
        );
        Ok(Self::from_dump(dump))
    }

    /// The model dump.
    pub fn dump_model(&self) -> &ModelDump {
        &self.dump
    }

    /// Number of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.dump.num_trees()
    }
}

impl DumpSource for Booster {
    fn model_dump(&self) -> Result<Cow<'_, ModelDump>> {
        Ok(Cow::Borrowed(&self.dump))
    }
}

/// Estimator wrapper around a booster; unfitted until a booster is attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LGBMModel {
    booster: Option<Booster>,
}

impl LGBMModel {
    /// Create an unfitted model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fitted model from its booster.
    pub fn from_booster(booster: Booster) -> Self {
        LGBMModel {
            booster: Some(booster),
        }
    }

    /// Whether a booster is attached.
    pub fn is_fitted(&self) -> bool {
        self.booster.is_some()
    }

    /// The fitted booster.
    pub fn booster(&self) -> Result<&Booster> {
        self.booster.as_ref().ok_or_else(|| {
            PlotError::invalid_argument_type(
                "LGBMModel is not fitted yet; fit it or pass a Booster",
            )
        })
    }
}

impl DumpSource for LGBMModel {
    fn model_dump(&self) -> Result<Cow<'_, ModelDump>> {
        self.booster()?.model_dump()
    }
}

impl DumpSource for ModelDump {
    fn model_dump(&self) -> Result<Cow<'_, ModelDump>> {
        Ok(Cow::Borrowed(self))
    }
}

/// Untyped JSON is accepted only when it has the shape of a model dump.
impl DumpSource for Value {
    fn model_dump(&self) -> Result<Cow<'_, ModelDump>> {
        let looks_like_dump = self
            .as_object()
            .map_or(false, |object| object.get("tree_info").map_or(false, Value::is_array));
        if !looks_like_dump {
            return Err(PlotError::invalid_argument_type(
                "booster must be Booster or LGBMModel, or a model dump object with a tree_info array",
            ));
        }
        let dump = ModelDump::deserialize(self)?;
        Ok(Cow::Owned(dump))
    }
}
