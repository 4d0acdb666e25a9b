use crate::canvas::{Edge, EdgeKind, Geometry, GraphModel, Node, NodeContent};
use crate::error::CanvasError;
use serde::{Deserialize, Deserializer};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasNodeFile {
    id: String,
    file: Option<String>,
    text: Option<String>,
    x: Option<f32>,
    y: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasEdgeFile {
    from_node: String,
    to_node: String,
    /// Presence of the key (with any value, including null) marks the
    /// edge as a Group edge; absence marks it as an Order edge.
    #[serde(default, deserialize_with = "present_marker")]
    to_end: Option<Option<serde_json::Value>>,
}

fn present_marker<'de, D>(deserializer: D) -> Result<Option<Option<serde_json::Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Value>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
struct CanvasFile {
    #[serde(default)]
    nodes: Vec<CanvasNodeFile>,
    #[serde(default)]
    edges: Vec<CanvasEdgeFile>,
}

/// Parse a CanvasDocument into a [`GraphModel`]. Strict JSON first; a
/// JSON5 fallback covers hand-edited documents with trailing commas or
/// comments.
pub fn parse_canvas(input: &str) -> Result<GraphModel, CanvasError> {
    let parsed: CanvasFile = match serde_json::from_str(input) {
        Ok(parsed) => parsed,
        Err(json_err) => {
            json5::from_str(input).map_err(|_| CanvasError::Malformed(json_err.to_string()))?
        }
    };
    Ok(build_model(parsed))
}

pub fn load_canvas(path: &Path) -> Result<GraphModel, CanvasError> {
    let contents = std::fs::read_to_string(path)?;
    parse_canvas(&contents)
}

fn build_model(file: CanvasFile) -> GraphModel {
    let nodes = file
        .nodes
        .into_iter()
        .map(|node| {
            let geometry = match (node.x, node.y, node.width, node.height) {
                (Some(x), Some(y), Some(width), Some(height)) => Some(Geometry {
                    x,
                    y,
                    width,
                    height,
                }),
                _ => None,
            };
            let content = match node.file {
                Some(path) => NodeContent::File { path },
                None => NodeContent::Text {
                    text: node.text.unwrap_or_default(),
                },
            };
            Node {
                id: node.id,
                content,
                geometry,
            }
        })
        .collect();

    let edges = file
        .edges
        .into_iter()
        .map(|edge| {
            let kind = if edge.to_end.is_some() {
                EdgeKind::Group
            } else {
                EdgeKind::Order
            };
            Edge {
                from_node: edge.from_node,
                to_node: edge.to_node,
                kind,
            }
        })
        .collect();

    GraphModel { nodes, edges }
}
