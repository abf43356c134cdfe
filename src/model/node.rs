//! Node in the similarity graph.

use serde::{Deserialize, Serialize};
use super::Rgb;

/// Positional index of a node in the decoded node sequence.
///
/// This is the only key the adjacency matrix knows about. It is stable for
/// the lifetime of a `GraphDataSet`: the node sequence is never reordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical-scale coordinates, present only for the rich profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A node in the similarity graph.
///
/// Serialized in the flat shape the renderer consumes: `value` goes out as
/// `val` and the position is flattened into `x`/`y`/`z`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Short unique label, e.g. a chemical symbol. Never empty.
    pub id: String,
    /// Categorical label. The quantized profile carries none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Display-size scalar (decoded radius, or degree-derived).
    #[serde(rename = "val")]
    pub value: f64,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub color: Rgb,
}

impl GraphNode {
    /// A node with provisional size 1 and the default color.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: None,
            value: 1.0,
            position: None,
            color: Rgb::DEFAULT_NODE,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = GraphNode::new("Fe");
        assert_eq!(node.id, "Fe");
        assert_eq!(node.value, 1.0);
        assert_eq!(node.color, Rgb::DEFAULT_NODE);
        assert!(node.group.is_none());
        assert!(node.position.is_none());
    }

    #[test]
    fn test_serialize_flat_shape() {
        let node = GraphNode::new("H")
            .with_group("1")
            .with_value(0.25)
            .with_position(Position::new(1.0, -2.0, 0.5))
            .with_color(Rgb::new(255, 0, 16));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], "H");
        assert_eq!(json["group"], "1");
        assert_eq!(json["val"], 0.25);
        assert_eq!(json["x"], 1.0);
        assert_eq!(json["y"], -2.0);
        assert_eq!(json["z"], 0.5);
        assert_eq!(json["color"], "#ff0010");
    }

    #[test]
    fn test_serialize_without_position() {
        let json = serde_json::to_value(GraphNode::new("He")).unwrap();
        assert!(json.get("x").is_none());
        assert!(json.get("group").is_none());
    }
}
