//! Graphviz DOT writer.
//!
//! Output layout follows the common Graphviz convention: one statement per
//! line, tab indented, the label first in every attribute list followed by
//! the remaining attributes in key order. Node and edge statements are
//! written in the order they were added to the graph.

use crate::graph::digraph::{Attributes, Digraph, GraphEdge, GraphNode, Label, Statement};
use std::fmt::Write;

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Render a graph as DOT source.
pub fn write_dot(graph: &Digraph) -> String {
    let mut out = String::new();

    if let Some(comment) = graph.comment() {
        for line in comment.lines() {
            let _ = writeln!(out, "// {}", line);
        }
    }

    match graph.name() {
        Some(name) => {
            let _ = writeln!(out, "digraph {} {{", quote_id(name));
        }
        None => out.push_str("digraph {\n"),
    }

    for (keyword, attrs) in [
        ("graph", graph.graph_attr()),
        ("node", graph.node_attr()),
        ("edge", graph.edge_attr()),
    ] {
        if !attrs.is_empty() {
            let _ = writeln!(out, "\t{} [{}]", keyword, attr_list(None, attrs));
        }
    }

    for statement in graph.statements() {
        match statement {
            Statement::Node(node) => write_node(&mut out, node),
            Statement::Edge(edge) => write_edge(&mut out, edge),
        }
    }

    out.push_str("}\n");
    out
}

fn write_node(out: &mut String, node: &GraphNode) {
    let _ = write!(out, "\t{}", quote_id(&node.id));
    if node.label.is_some() || !node.attrs.is_empty() {
        let _ = write!(out, " [{}]", attr_list(node.label.as_ref(), &node.attrs));
    }
    out.push('\n');
}

fn write_edge(out: &mut String, edge: &GraphEdge) {
    let _ = write!(out, "\t{} -> {}", quote_id(&edge.tail), quote_id(&edge.head));
    if edge.label.is_some() || !edge.attrs.is_empty() {
        let _ = write!(out, " [{}]", attr_list(edge.label.as_ref(), &edge.attrs));
    }
    out.push('\n');
}

fn attr_list(label: Option<&Label>, attrs: &Attributes) -> String {
    let mut parts = Vec::with_capacity(attrs.len() + 1);
    if let Some(label) = label {
        parts.push(format!("label={}", quote_label(label)));
    }
    for (key, value) in attrs {
        if key == "label" {
            parts.push(format!("label={}", quote_label(&Label::Text(value.clone()))));
        } else {
            parts.push(format!("{}={}", quote_id(key), quote_id(value)));
        }
    }
    parts.join(" ")
}

fn quote_label(label: &Label) -> String {
    match label {
        Label::Html(html) => format!("<{}>", html),
        Label::Text(text) => quote_id(text),
    }
}

/// Quote a DOT identifier unless it is a plain ID or a numeral.
///
/// Inside quotes `"` is escaped; a trailing backslash is doubled so it
/// cannot escape the closing quote.
pub fn quote_id(id: &str) -> String {
    if is_plain_id(id) || is_numeral(id) {
        return id.to_string();
    }
    let mut quoted = id.replace('"', "\\\"");
    let trailing = quoted.len() - quoted.trim_end_matches('\\').len();
    if trailing % 2 == 1 {
        quoted.push('\\');
    }
    format!("\"{}\"", quoted)
}

fn is_plain_id(id: &str) -> bool {
    let mut chars = id.chars();
    let first_ok = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    };
    first_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.iter().any(|keyword| keyword.eq_ignore_ascii_case(id))
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    if digits.is_empty() {
        return false;
    }
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && all_digits(whole),
        Some(fraction) => {
            (!whole.is_empty() || !fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
        }
    }
}
