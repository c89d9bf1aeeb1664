//! Static legend node explaining the fill colors.

use crate::core::constants::*;
use crate::graph::{GraphNode, Label};

/// The legend node appended after every tree.
///
/// The row titles say "Increasing/Decreasing" while split fills are chosen
/// from the branch side, not from monotone constraints.
pub fn legend_node() -> GraphNode {
    GraphNode::new(LEGEND_NODE_ID)
        .label(Label::Html(legend_table()))
        .attr("shape", "rectangle")
        .attr("color", "black")
}

fn legend_table() -> String {
    let rows = [
        ("Increasing", YES_FILL_COLOR),
        ("Decreasing", NO_FILL_COLOR),
        ("Leaf Node", LEAF_FILL_COLOR),
        ("Root Node", ROOT_FILL_COLOR),
    ];

    let mut table = String::from(
        "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">\
         <TR><TD COLSPAN=\"2\"><B>Monotone constraints</B></TD></TR>",
    );
    for (title, color) in rows {
        table.push_str(&format!(
            "<TR><TD>{}</TD><TD BGCOLOR=\"{}\"></TD></TR>",
            title, color
        ));
    }
    table.push_str("</TABLE>");
    table
}
