use crate::canvas::{Node, NodeContent};
use crate::listing::DirectoryListing;
use crate::markdown::markdown_to_html;
use serde::Serialize;
use std::path::PathBuf;

/// Substituted when a definition text cannot be read.
pub const DEFINITION_PLACEHOLDER: &str = "Definition not available.";

/// What the presentation layer should show for one node, resolved from
/// the companion-media probe (gif, then png, then pdf), falling back to
/// the node's inline text and finally to a repo-name label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MediaSource {
    Gif(String),
    Png(String),
    Pdf(String),
    /// Inline text payload, already converted to markup.
    Inline(String),
    /// Nothing to show but the repo name.
    Label(String),
}

pub fn resolve_media(node: &Node, listing: &DirectoryListing) -> MediaSource {
    let repo = node.repo_name();
    for (extension, build) in [
        ("gif", MediaSource::Gif as fn(String) -> MediaSource),
        ("png", MediaSource::Png),
        ("pdf", MediaSource::Pdf),
    ] {
        let file = format!("{repo}.{extension}");
        if listing.file_exists(repo, &file) {
            return build(format!("{repo}/{file}"));
        }
    }
    if let NodeContent::Text { text } = &node.content {
        if !text.is_empty() {
            return MediaSource::Inline(markdown_to_html(text));
        }
    }
    MediaSource::Label(repo.to_string())
}

/// Supplies the definition markup shown beside glossary entries.
pub trait DefinitionTextProvider {
    fn definition_html(&self, repo_name: &str) -> String;
}

/// Reads `<root>/<repo>/README.md` from disk and converts it. Any read
/// failure is logged and substituted with the fixed placeholder.
#[derive(Debug, Clone)]
pub struct FsDefinitionProvider {
    root: PathBuf,
}

impl FsDefinitionProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DefinitionTextProvider for FsDefinitionProvider {
    fn definition_html(&self, repo_name: &str) -> String {
        let path = self.root.join(repo_name).join("README.md");
        match std::fs::read_to_string(&path) {
            Ok(markdown) => markdown_to_html(&markdown),
            Err(err) => {
                tracing::warn!(repo = repo_name, error = %err, "definition text unavailable");
                DEFINITION_PLACEHOLDER.to_string()
            }
        }
    }
}
