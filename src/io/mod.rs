//! Model input: the LightGBM dump format and the model handles wrapping it.

pub mod dump;
pub mod model_file;

pub use dump::{DumpNode, LeafNode, ModelDump, SplitNode, Threshold, TreeInfo};
pub use model_file::{Booster, DumpSource, LGBMModel};
