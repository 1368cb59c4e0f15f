use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::types::DatabaseKind;

/// Suffixes (after the kind letter) that every complete database must have
pub const REQUIRED_SUFFIXES: [&str; 3] = ["hr", "in", "sq"];

/// Suffixes of recognized but optional companion files
pub const OPTIONAL_SUFFIXES: [&str; 18] = [
    "sd", "si", "og", "nd", "ni", "pd", "pi", "hd", "hi", "aa", "ab", "ac", "db", "os", "ot", "tf",
    "to", "js",
];

/// Suffix of the alias file carrying human-readable metadata
pub const ALIAS_SUFFIX: &str = "al";

/// Role a companion file plays in a database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionRole {
    Required,
    Optional,
    Alias,
}

/// Classify a file extension as a companion of some database kind
///
/// Extensions are matched case-sensitively, as BLAST+ writes them.
#[must_use]
pub fn classify_extension(ext: &str) -> Option<(DatabaseKind, CompanionRole)> {
    let mut chars = ext.chars();
    let kind = DatabaseKind::from_prefix(chars.next()?)?;
    let suffix = chars.as_str();

    let role = if REQUIRED_SUFFIXES.contains(&suffix) {
        CompanionRole::Required
    } else if OPTIONAL_SUFFIXES.contains(&suffix) {
        CompanionRole::Optional
    } else if suffix == ALIAS_SUFFIX {
        CompanionRole::Alias
    } else {
        return None;
    };

    Some((kind, role))
}

/// Full extension (e.g. `nin`) for a kind and suffix
#[must_use]
pub fn extension(kind: DatabaseKind, suffix: &str) -> String {
    format!("{}{suffix}", kind.prefix())
}

/// Files in one directory that share a base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub directory: PathBuf,
    pub base_name: OsString,
    pub extensions: BTreeSet<String>,
}

impl Candidate {
    pub fn new(directory: impl Into<PathBuf>, base_name: impl Into<OsString>) -> Self {
        Self {
            directory: directory.into(),
            base_name: base_name.into(),
            extensions: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions
            .extend(extensions.into_iter().map(Into::into));
        self
    }

    /// Path of the file set without any extension
    #[must_use]
    pub fn base_path(&self) -> PathBuf {
        self.directory.join(&self.base_name)
    }

    /// Path of one companion file.
    ///
    /// Base names may themselves contain dots, so the extension is appended
    /// rather than substituted.
    #[must_use]
    pub fn companion_path(&self, ext: &str) -> PathBuf {
        companion_file(&self.base_path(), ext)
    }

    #[must_use]
    pub fn has(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }

    /// Whether any required file for `kind` is present
    #[must_use]
    pub fn mentions(&self, kind: DatabaseKind) -> bool {
        REQUIRED_SUFFIXES
            .iter()
            .any(|suffix| self.has(&extension(kind, suffix)))
    }

    /// Required extensions for `kind` that are absent
    #[must_use]
    pub fn missing_required(&self, kind: DatabaseKind) -> Vec<String> {
        REQUIRED_SUFFIXES
            .iter()
            .map(|suffix| extension(kind, suffix))
            .filter(|ext| !self.has(ext))
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self, kind: DatabaseKind) -> bool {
        self.missing_required(kind).is_empty()
    }

    #[must_use]
    pub fn alias_path(&self, kind: DatabaseKind) -> Option<PathBuf> {
        let ext = extension(kind, ALIAS_SUFFIX);
        self.has(&ext).then(|| self.companion_path(&ext))
    }

    #[must_use]
    pub fn index_path(&self, kind: DatabaseKind) -> PathBuf {
        self.companion_path(&extension(kind, "in"))
    }
}

/// Companion file of a base path, e.g. `/db/nt.00` + `nin` -> `/db/nt.00.nin`
#[must_use]
pub fn companion_file(base_path: &Path, ext: &str) -> PathBuf {
    let mut path = base_path.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Split a file path into (base name, companion extension) if it is a companion file
#[must_use]
pub fn split_companion(path: &Path) -> Option<(&OsStr, &str)> {
    let ext = path.extension()?.to_str()?;
    classify_extension(ext)?;
    let stem = path.file_stem()?;
    Some((stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_extension() {
        assert_eq!(
            classify_extension("nin"),
            Some((DatabaseKind::Nucleotide, CompanionRole::Required))
        );
        assert_eq!(
            classify_extension("psq"),
            Some((DatabaseKind::Protein, CompanionRole::Required))
        );
        assert_eq!(
            classify_extension("nog"),
            Some((DatabaseKind::Nucleotide, CompanionRole::Optional))
        );
        assert_eq!(
            classify_extension("pal"),
            Some((DatabaseKind::Protein, CompanionRole::Alias))
        );
        assert_eq!(classify_extension("fasta"), None);
        assert_eq!(classify_extension("NIN"), None);
        assert_eq!(classify_extension(""), None);
    }

    #[test]
    fn test_split_companion_keeps_dotted_base() {
        let path = Path::new("/db/Sinvicta2-2-3.prot.subset.phr");
        let (stem, ext) = split_companion(path).unwrap();
        assert_eq!(stem, "Sinvicta2-2-3.prot.subset");
        assert_eq!(ext, "phr");

        assert!(split_companion(Path::new("/db/reads.fastq")).is_none());
        assert!(split_companion(Path::new("/db/README")).is_none());
    }

    #[test]
    fn test_companion_path_appends_extension() {
        let candidate = Candidate::new("/db", "genome.v2");
        assert_eq!(
            candidate.companion_path("nin"),
            PathBuf::from("/db/genome.v2.nin")
        );
    }

    #[test]
    fn test_missing_required() {
        let candidate = Candidate::new("/db", "genome").with_extensions(["nhr", "nin", "nog"]);
        assert!(candidate.mentions(DatabaseKind::Nucleotide));
        assert!(!candidate.mentions(DatabaseKind::Protein));
        assert_eq!(candidate.missing_required(DatabaseKind::Nucleotide), vec!["nsq"]);
        assert!(!candidate.is_complete(DatabaseKind::Nucleotide));
    }

    #[test]
    fn test_alias_path() {
        let candidate = Candidate::new("/db", "nt").with_extensions(["nal"]);
        assert_eq!(
            candidate.alias_path(DatabaseKind::Nucleotide),
            Some(PathBuf::from("/db/nt.nal"))
        );
        assert_eq!(candidate.alias_path(DatabaseKind::Protein), None);
    }
}
