//! Arena representation of a single dumped decision tree.

pub mod node;
pub mod tree;

pub use node::{ArenaNode, Branch, LeafData, NodeKind, SplitData};
pub use tree::TreeArena;
