//! Export: write a decoded graph out for other consumers.
//!
//! ```text
//! GraphDataSet → export_json()         → {nodes, links} for the 3D renderer
//!              → export_cypher_dump()  → CREATE / MATCH…CREATE statements
//! ```

use std::io::Write;

use crate::model::{GraphDataSet, GraphNode};
use crate::Result;

/// Relationship type used for similarity links in a Cypher dump.
pub const SIMILAR_REL_TYPE: &str = "SIMILAR";

/// Write the renderer-shaped JSON document (`nodes` + `links`).
pub fn export_json(graph: &GraphDataSet, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer(&mut *writer, graph)?;
    writeln!(writer)?;
    Ok(())
}

/// Export a graph as a Cypher script.
///
/// One CREATE per node (positional index kept as `_idx`), then one
/// MATCH…CREATE per link. Links are written in the stored direction,
/// later-indexed node first.
pub fn export_cypher_dump(graph: &GraphDataSet, writer: &mut dyn Write) -> Result<()> {
    // Header
    writeln!(writer, "// simnet-codec Cypher DUMP")?;
    writeln!(writer, "// Nodes: {}", graph.len())?;
    writeln!(writer, "// Links: {}", graph.link_count())?;
    writeln!(writer)?;

    for (i, node) in graph.nodes().iter().enumerate() {
        writeln!(writer, "CREATE (n:Element {{_idx: {}, {}}});", i, format_node_properties(node))?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Links")?;

    for link in graph.links() {
        writeln!(
            writer,
            "MATCH (a {{_idx: {}}}), (b {{_idx: {}}}) CREATE (a)-[:{} {{similarity: {}}}]->(b);",
            link.source_index,
            link.target_index,
            SIMILAR_REL_TYPE,
            link.weight,
        )?;
    }

    Ok(())
}

fn format_node_properties(node: &GraphNode) -> String {
    let mut parts = vec![
        format!("id: {}", quote(&node.id)),
        format!("val: {}", node.value),
        format!("color: {}", quote(&node.color.to_hex())),
    ];
    if let Some(group) = &node.group {
        parts.push(format!("group: {}", quote(group)));
    }
    if let Some(p) = node.position {
        parts.push(format!("x: {}, y: {}, z: {}", p.x, p.y, p.z));
    }
    parts.join(", ")
}

/// Cypher string literal.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
