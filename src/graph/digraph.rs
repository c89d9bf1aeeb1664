//! Directed graph value produced by the tree renderer.
//!
//! Storage is a petgraph [`DiGraph`] with a side index from node identifier
//! to [`NodeIndex`]. Statements are also recorded in emission order, which
//! is the order the DOT writer replays them in. Adding a node whose
//! identifier already exists merges the new attributes into it, the way
//! repeated Graphviz node statements do.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attribute map; ordered so DOT output is deterministic.
pub type Attributes = BTreeMap<String, String>;

/// Node or edge caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Plain text, quoted in DOT output
    Text(String),
    /// Graphviz HTML-like label, emitted between `<` and `>`
    Html(String),
}

impl Label {
    /// Raw label content without delimiters.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Text(text) | Label::Html(text) => text,
        }
    }

    /// Whether the label is HTML-like.
    pub fn is_html(&self) -> bool {
        matches!(self, Label::Html(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styled graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Identifier
    pub id: String,
    /// Caption
    pub label: Option<Label>,
    /// Remaining attributes (`shape`, `style`, `fillcolor`, ...)
    pub attrs: Attributes,
}

impl GraphNode {
    /// Create a node without attributes.
    pub fn new<S: Into<String>>(id: S) -> Self {
        GraphNode {
            id: id.into(),
            label: None,
            attrs: Attributes::new(),
        }
    }

    /// Set the caption.
    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Set an attribute.
    pub fn attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Attribute value, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Fill color, if set.
    pub fn fillcolor(&self) -> Option<&str> {
        self.get("fillcolor")
    }
}

/// Directed edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Source node identifier
    pub tail: String,
    /// Target node identifier
    pub head: String,
    /// Caption
    pub label: Option<Label>,
    /// Remaining attributes (`color`, ...)
    pub attrs: Attributes,
}

impl GraphEdge {
    /// Create an edge without attributes.
    pub fn new<T: Into<String>, H: Into<String>>(tail: T, head: H) -> Self {
        GraphEdge {
            tail: tail.into(),
            head: head.into(),
            label: None,
            attrs: Attributes::new(),
        }
    }

    /// Set the caption.
    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Set an attribute.
    pub fn attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Edge color, if set.
    pub fn color(&self) -> Option<&str> {
        self.attrs.get("color").map(String::as_str)
    }
}

/// One statement of the graph body, borrowed from a [`Digraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// Node statement
    Node(&'a GraphNode),
    /// Edge statement
    Edge(&'a GraphEdge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Node(NodeIndex),
    Edge(EdgeIndex),
}

/// Directed graph with graph-level and default node/edge attributes.
#[derive(Debug, Clone, Default)]
pub struct Digraph {
    name: Option<String>,
    comment: Option<String>,
    graph_attr: Attributes,
    node_attr: Attributes,
    edge_attr: Attributes,
    graph: DiGraph<GraphNode, GraphEdge>,
    node_index: HashMap<String, NodeIndex>,
    body: Vec<Entry>,
}

impl Digraph {
    /// Create an empty anonymous graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the graph.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a comment emitted before the graph.
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set a graph attribute.
    pub fn set_graph_attr<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.graph_attr.insert(key.into(), value.into());
    }

    /// Set a default node attribute.
    pub fn set_node_attr<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.node_attr.insert(key.into(), value.into());
    }

    /// Set a default edge attribute.
    pub fn set_edge_attr<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.edge_attr.insert(key.into(), value.into());
    }

    /// Add a node, merging into an existing node with the same identifier.
    ///
    /// A node first seen as an edge endpoint gets its statement here.
    pub fn add_node(&mut self, node: GraphNode) {
        match self.node_index.get(&node.id).copied() {
            Some(index) => {
                let declared = self.body.contains(&Entry::Node(index));
                let existing = &mut self.graph[index];
                if node.label.is_some() {
                    existing.label = node.label;
                }
                existing.attrs.extend(node.attrs);
                if !declared {
                    self.body.push(Entry::Node(index));
                }
            }
            None => {
                let id = node.id.clone();
                let index = self.graph.add_node(node);
                self.node_index.insert(id, index);
                self.body.push(Entry::Node(index));
            }
        }
    }

    /// Add an edge. Endpoints not added yet exist implicitly, without a
    /// node statement of their own.
    pub fn add_edge(&mut self, edge: GraphEdge) {
        let tail = self.endpoint(&edge.tail);
        let head = self.endpoint(&edge.head);
        let index = self.graph.add_edge(tail, head, edge);
        self.body.push(Entry::Edge(index));
    }

    fn endpoint(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.node_index.get(id) {
            return index;
        }
        let index = self.graph.add_node(GraphNode::new(id));
        self.node_index.insert(id.to_string(), index);
        index
    }

    /// Graph name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Leading comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Graph attributes.
    pub fn graph_attr(&self) -> &Attributes {
        &self.graph_attr
    }

    /// Default node attributes.
    pub fn node_attr(&self) -> &Attributes {
        &self.node_attr
    }

    /// Default edge attributes.
    pub fn edge_attr(&self) -> &Attributes {
        &self.edge_attr
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.graph.edge_references().map(|edge| edge.weight())
    }

    /// Node and edge statements in the order they were added.
    pub fn statements(&self) -> impl Iterator<Item = Statement<'_>> + '_ {
        self.body.iter().map(move |entry| match *entry {
            Entry::Node(index) => Statement::Node(&self.graph[index]),
            Entry::Edge(index) => Statement::Edge(&self.graph[index]),
        })
    }

    /// Look a node up by identifier.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&index| &self.graph[index])
    }

    /// Edge from `tail` to `head`, if any.
    pub fn edge(&self, tail: &str, head: &str) -> Option<&GraphEdge> {
        let tail = *self.node_index.get(tail)?;
        let head = *self.node_index.get(head)?;
        self.graph
            .find_edge(tail, head)
            .map(|index| &self.graph[index])
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Underlying petgraph graph, for traversals and algorithms.
    pub fn as_petgraph(&self) -> &DiGraph<GraphNode, GraphEdge> {
        &self.graph
    }

    /// Graphviz DOT source of the graph.
    pub fn to_dot(&self) -> String {
        crate::graph::dot::write_dot(self)
    }
}

impl fmt::Display for Digraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot())
    }
}
