use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::types::{DatabaseId, DatabaseKind};

/// A validated BLAST+ database discovered under the database directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDescriptor {
    /// Unique identifier (base path relative to the scan root)
    pub identifier: DatabaseId,

    /// Human-readable title; the identifier when no metadata was found
    pub title: String,

    /// Molecule type
    pub kind: DatabaseKind,

    /// Absolute base path of the companion file set (without extension)
    pub path: PathBuf,

    /// Number of sequences, when the metadata could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_count: Option<u64>,

    /// Total residue count, when the metadata could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_length: Option<u64>,

    /// Build date recorded in the index header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Time of the scan that produced this descriptor
    pub discovered_at: DateTime<Utc>,
}

impl DatabaseDescriptor {
    pub fn new(
        identifier: impl Into<String>,
        kind: DatabaseKind,
        path: impl Into<PathBuf>,
        discovered_at: DateTime<Utc>,
    ) -> Self {
        let identifier = DatabaseId::new(identifier);
        Self {
            title: identifier.to_string(),
            identifier,
            kind,
            path: path.into(),
            sequence_count: None,
            total_length: None,
            created: None,
            discovered_at,
        }
    }

    /// Set the title, ignoring blank values so the identifier fallback stays in place
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        if let Some(title) = title.map(|t| t.trim().to_string()) {
            if !title.is_empty() {
                self.title = title;
            }
        }
        self
    }

    #[must_use]
    pub fn with_counts(mut self, sequence_count: Option<u64>, total_length: Option<u64>) -> Self {
        self.sequence_count = sequence_count;
        self.total_length = total_length;
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: Option<String>) -> Self {
        self.created = created.filter(|c| !c.trim().is_empty());
        self
    }

    /// Whether the title came from metadata rather than the identifier fallback
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.title != self.identifier.0
    }

    /// Identity used to compare two scans of the same tree.
    ///
    /// Metadata and discovery time are excluded; they may legitimately differ
    /// between runs.
    #[must_use]
    pub fn key(&self) -> (&DatabaseId, DatabaseKind, &std::path::Path) {
        (&self.identifier, self.kind, self.path.as_path())
    }
}

impl std::fmt::Display for DatabaseDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.identifier, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> DatabaseDescriptor {
        DatabaseDescriptor::new(
            "genome/Solenopsis_invicta",
            DatabaseKind::Nucleotide,
            "/db/genome/Solenopsis_invicta",
            Utc::now(),
        )
    }

    #[test]
    fn test_title_falls_back_to_identifier() {
        let db = descriptor();
        assert_eq!(db.title, "genome/Solenopsis_invicta");
        assert!(!db.has_title());

        let db = db.with_title(Some("   ".to_string()));
        assert_eq!(db.title, "genome/Solenopsis_invicta");
    }

    #[test]
    fn test_with_title_and_counts() {
        let db = descriptor()
            .with_title(Some("Solenopsis invicta genome".to_string()))
            .with_counts(Some(12), Some(4_000));

        assert!(db.has_title());
        assert_eq!(db.title, "Solenopsis invicta genome");
        assert_eq!(db.sequence_count, Some(12));
        assert_eq!(db.total_length, Some(4_000));
    }

    #[test]
    fn test_key_ignores_metadata_and_time() {
        let a = descriptor();
        let b = descriptor()
            .with_title(Some("Another title".to_string()))
            .with_counts(Some(1), None);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_json_omits_absent_metadata() {
        let json = serde_json::to_string(&descriptor()).unwrap();
        assert!(json.contains("\"kind\":\"nucleotide\""));
        assert!(!json.contains("sequence_count"));
        assert!(!json.contains("created"));
    }
}
