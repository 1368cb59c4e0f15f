use serde::{Deserialize, Serialize};

/// Unique identifier for a database in the catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseId(pub String);

impl DatabaseId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for DatabaseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DatabaseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Molecule type stored in a database
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKind {
    Nucleotide,
    Protein,
}

impl DatabaseKind {
    /// Both kinds, in the order candidates are validated
    pub const ALL: [Self; 2] = [Self::Nucleotide, Self::Protein];

    /// Leading letter of every companion extension for this kind (`n` or `p`)
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Nucleotide => 'n',
            Self::Protein => 'p',
        }
    }

    /// Kind implied by a companion extension's leading letter
    #[must_use]
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Nucleotide),
            'p' => Some(Self::Protein),
            _ => None,
        }
    }

    /// Suffix appended to the identifier when a base name carries both kinds
    #[must_use]
    pub fn identifier_suffix(self) -> &'static str {
        match self {
            Self::Nucleotide => "nucl",
            Self::Protein => "prot",
        }
    }

    /// Molecule type code used in the binary index header
    #[must_use]
    pub fn header_code(self) -> u32 {
        match self {
            Self::Nucleotide => 0,
            Self::Protein => 1,
        }
    }
}

impl std::fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nucleotide => write!(f, "nucleotide"),
            Self::Protein => write!(f, "protein"),
        }
    }
}
