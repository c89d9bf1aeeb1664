//! Rendered graph value and its Graphviz DOT serialization.

pub mod digraph;
pub mod dot;

pub use digraph::{Attributes, Digraph, GraphEdge, GraphNode, Label, Statement};
pub use dot::{quote_id, write_dot};
