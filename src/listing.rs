use crate::error::CanvasError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Nested path-segment map mirroring `directory-listing.json`, used to
/// answer existence checks without touching the filesystem or network.
/// Read-only once built; the core never sees it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DirectoryListing {
    entries: BTreeMap<String, ListingEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ListingEntry {
    Directory(BTreeMap<String, ListingEntry>),
    Leaf(serde_json::Value),
}

impl DirectoryListing {
    pub fn parse(input: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(input).map_err(|err| CanvasError::Malformed(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Walk `path` segment by segment and check whether `file` exists in
    /// the directory it names.
    pub fn file_exists(&self, path: &str, file: &str) -> bool {
        let mut current = &self.entries;
        for part in path.split('/') {
            match current.get(part) {
                Some(ListingEntry::Directory(next)) => current = next,
                _ => return false,
            }
        }
        current.contains_key(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> DirectoryListing {
        DirectoryListing::parse(
            r#"{
                "BirdRepo": {
                    "BirdRepo.gif": null,
                    "README.md": null,
                    "nested": {"deep.png": null}
                },
                "TextRepo": {"README.md": null}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn finds_files_in_listed_directories() {
        let listing = listing();
        assert!(listing.file_exists("BirdRepo", "BirdRepo.gif"));
        assert!(listing.file_exists("BirdRepo/nested", "deep.png"));
        assert!(!listing.file_exists("BirdRepo", "BirdRepo.png"));
    }

    #[test]
    fn unknown_paths_do_not_exist() {
        let listing = listing();
        assert!(!listing.file_exists("GhostRepo", "README.md"));
        assert!(!listing.file_exists("BirdRepo/missing", "deep.png"));
    }

    #[test]
    fn walking_through_a_file_fails() {
        let listing = listing();
        assert!(!listing.file_exists("BirdRepo/README.md", "anything"));
    }

    #[test]
    fn empty_listing_answers_false() {
        let listing = DirectoryListing::default();
        assert!(!listing.file_exists("Repo", "Repo.gif"));
    }
}
