//! In-memory model of a canvas document: nodes with optional stored
//! geometry, plus directed reading-order edges and non-directional
//! grouping edges between them.

/// Free-form authoring coordinates as stored in the document. Layout
/// strategies decide how (and whether) to use them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// Reference into the media tree, e.g. `BirdSong/BirdSong.gif`.
    File { path: String },
    /// Inline markdown payload.
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub content: NodeContent,
    pub geometry: Option<Geometry>,
}

impl Node {
    /// The repository a node belongs to: the leading path segment of a
    /// file reference, or the node id for inline text.
    pub fn repo_name(&self) -> &str {
        match &self.content {
            NodeContent::File { path } => path.split('/').next().unwrap_or(path),
            NodeContent::Text { .. } => &self.id,
        }
    }

    pub fn size(&self) -> Option<(f32, f32)> {
        self.geometry.map(|g| (g.width, g.height))
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.geometry.map(|g| (g.x, g.y))
    }
}

/// Directed edges impose reading order; non-directional edges pull their
/// endpoints into one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Order,
    Group,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from_node: String,
    pub to_node: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphModel {
    /// Resolve a node by id. The last occurrence wins when a document
    /// carries duplicate ids, matching the original viewer's lookup.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().rev().find(|node| node.id == id)
    }

    /// Repositories referenced through `README.md` file nodes, deduped
    /// in input order. Drives submodule syncing in the original tool.
    pub fn repo_references(&self) -> Vec<String> {
        let mut repos = Vec::new();
        for node in &self.nodes {
            let NodeContent::File { path } = &node.content else {
                continue;
            };
            if !path.ends_with("README.md") {
                continue;
            }
            let repo = node.repo_name();
            if !repos.iter().any(|r| r == repo) {
                repos.push(repo.to_string());
            }
        }
        repos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_node(id: &str, path: &str) -> Node {
        Node {
            id: id.to_string(),
            content: NodeContent::File {
                path: path.to_string(),
            },
            geometry: None,
        }
    }

    #[test]
    fn repo_name_takes_the_leading_path_segment() {
        assert_eq!(file_node("a", "BirdSong/BirdSong.gif").repo_name(), "BirdSong");
        assert_eq!(file_node("a", "flat.png").repo_name(), "flat.png");
        let text = Node {
            id: "note-1".to_string(),
            content: NodeContent::Text {
                text: "hello".to_string(),
            },
            geometry: None,
        };
        assert_eq!(text.repo_name(), "note-1");
    }

    #[test]
    fn duplicate_ids_resolve_to_the_last_node() {
        let graph = GraphModel {
            nodes: vec![
                file_node("a", "First/README.md"),
                file_node("a", "Second/README.md"),
            ],
            edges: Vec::new(),
        };
        assert_eq!(graph.node("a").unwrap().repo_name(), "Second");
    }

    #[test]
    fn repo_references_dedupe_in_input_order() {
        let graph = GraphModel {
            nodes: vec![
                file_node("n1", "River/README.md"),
                file_node("n2", "Bird/Bird.gif"),
                file_node("n3", "Bird/README.md"),
                file_node("n4", "River/README.md"),
            ],
            edges: Vec::new(),
        };
        assert_eq!(graph.repo_references(), vec!["River", "Bird"]);
    }
}
