use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::descriptor::DatabaseDescriptor;
use crate::core::types::{DatabaseId, DatabaseKind};
use crate::discovery::companion::{companion_file, extension, Candidate};
use crate::parsing::alias::{parse_alias_file, AliasFile};
use crate::parsing::index_header::{parse_index_file, IndexHeader};
use crate::utils::validation::identifier_from_relative;

/// Why a candidate was not turned into a database
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("not a database: no index, header or sequence file present")]
    NotADatabase,

    #[error("incomplete {kind} index: missing {}", missing.join(", "))]
    IncompleteIndex {
        kind: DatabaseKind,
        missing: Vec<String>,
    },

    #[error("{kind} alias lists volumes that are not complete databases: {}", missing.join(", "))]
    UnresolvedVolumes {
        kind: DatabaseKind,
        missing: Vec<String>,
    },

    #[error("identifier '{identifier}' is already used by {}", first.display())]
    DuplicateIdentifier {
        identifier: DatabaseId,
        first: PathBuf,
    },

    #[error("name is not valid UTF-8 or lies outside the database directory")]
    InvalidName,
}

/// A candidate that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Base path of the candidate
    pub path: PathBuf,
    pub reason: RejectionReason,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Result of validating one candidate for one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Accepted(DatabaseDescriptor),
    Rejected(Rejection),
}

/// Optional metadata gathered from companion files
#[derive(Debug, Default)]
struct Metadata {
    title: Option<String>,
    sequence_count: Option<u64>,
    total_length: Option<u64>,
    created: Option<String>,
}

impl Metadata {
    fn from_alias(alias: &AliasFile) -> Self {
        Self {
            title: alias.title.clone(),
            sequence_count: alias.sequence_count,
            total_length: alias.total_length,
            created: None,
        }
    }

    /// Fill fields the alias file left out
    fn fill_from_header(&mut self, header: IndexHeader) {
        self.title = self.title.take().or(Some(header.title));
        self.sequence_count = self.sequence_count.or(Some(header.sequence_count));
        self.total_length = self.total_length.or(Some(header.total_length));
        self.created = self.created.take().or(Some(header.date));
    }
}

/// Volumes named by the DBLIST of an alias-only candidate
#[derive(Debug, Clone)]
enum AliasVolumes {
    /// Every volume is a complete companion set
    Resolved { alias: AliasFile, volumes: Vec<PathBuf> },
    /// DBLIST entries that did not resolve
    Unresolved(Vec<String>),
}

/// Where an accepted database gets its files from
enum Source {
    Files,
    Volumes { alias: AliasFile, volumes: Vec<PathBuf> },
}

/// Validates candidates from a single scan.
///
/// Identifiers are tracked across calls so that a second candidate mapping to
/// an identifier already handed out is rejected instead of shadowing the first.
///
/// Multi-volume databases are declared by an alias file whose `DBLIST` names
/// the volumes. [`Validator::index`] must see every candidate first so that
/// such an alias becomes one database and its volumes are not registered on
/// their own.
pub struct Validator {
    root: PathBuf,
    scanned_at: DateTime<Utc>,
    seen: HashMap<DatabaseId, PathBuf>,
    aliases: HashMap<(PathBuf, DatabaseKind), AliasVolumes>,
    /// Volume base path and kind -> alias base path that owns it
    claimed: HashMap<(PathBuf, DatabaseKind), PathBuf>,
}

impl Validator {
    /// `root` must be the canonical scan root; identifiers are derived relative to it
    pub fn new(root: impl Into<PathBuf>, scanned_at: DateTime<Utc>) -> Self {
        Self {
            root: root.into(),
            scanned_at,
            seen: HashMap::new(),
            aliases: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    /// Resolve alias-only candidates against the complete sets of this scan
    pub fn index(&mut self, candidates: &[Candidate]) {
        let complete: HashSet<(PathBuf, DatabaseKind)> = candidates
            .iter()
            .flat_map(|c| {
                DatabaseKind::ALL
                    .into_iter()
                    .filter(move |&kind| c.is_complete(kind))
                    .map(move |kind| (c.base_path(), kind))
            })
            .collect();

        for candidate in candidates {
            for kind in DatabaseKind::ALL {
                if candidate.mentions(kind) {
                    continue;
                }
                let Some(alias_path) = candidate.alias_path(kind) else {
                    continue;
                };
                let alias = match parse_alias_file(&alias_path) {
                    Ok(alias) if !alias.dblist.is_empty() => alias,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Ignoring unreadable alias file {}: {e}", alias_path.display());
                        continue;
                    }
                };

                let base_path = candidate.base_path();
                let volumes: Vec<PathBuf> = alias
                    .dblist
                    .iter()
                    .map(|entry| candidate.directory.join(entry))
                    .collect();
                let missing: Vec<String> = alias
                    .dblist
                    .iter()
                    .zip(&volumes)
                    .filter(|(_, volume)| !complete.contains(&(volume.to_path_buf(), kind)))
                    .map(|(entry, _)| entry.clone())
                    .collect();

                let entry = if missing.is_empty() {
                    for volume in &volumes {
                        self.claimed
                            .entry((volume.clone(), kind))
                            .or_insert_with(|| base_path.clone());
                    }
                    AliasVolumes::Resolved { alias, volumes }
                } else {
                    AliasVolumes::Unresolved(missing)
                };
                self.aliases.insert((base_path, kind), entry);
            }
        }
    }

    /// Validate a candidate, producing one outcome per kind it mentions.
    ///
    /// A kind whose files are a volume of an indexed alias yields no outcome.
    pub fn validate(&mut self, candidate: &Candidate) -> Vec<ScanOutcome> {
        let base_path = candidate.base_path();
        let mut outcomes = Vec::new();
        let mut complete = Vec::new();
        let mut considered = false;

        for kind in DatabaseKind::ALL {
            let key = (base_path.clone(), kind);
            if candidate.mentions(kind) {
                considered = true;
                if let Some(owner) = self.claimed.get(&key) {
                    debug!(
                        "{} is a {kind} volume of {}",
                        base_path.display(),
                        owner.display()
                    );
                    continue;
                }
                let missing = candidate.missing_required(kind);
                if missing.is_empty() {
                    complete.push((kind, Source::Files));
                } else {
                    outcomes.push(reject(
                        base_path.clone(),
                        RejectionReason::IncompleteIndex { kind, missing },
                    ));
                }
            } else if let Some(volumes) = self.aliases.get(&key) {
                considered = true;
                match volumes {
                    AliasVolumes::Resolved { alias, volumes } => complete.push((
                        kind,
                        Source::Volumes {
                            alias: alias.clone(),
                            volumes: volumes.clone(),
                        },
                    )),
                    AliasVolumes::Unresolved(missing) => outcomes.push(reject(
                        base_path.clone(),
                        RejectionReason::UnresolvedVolumes {
                            kind,
                            missing: missing.clone(),
                        },
                    )),
                }
            }
        }

        if !considered {
            return vec![reject(base_path, RejectionReason::NotADatabase)];
        }
        if complete.is_empty() {
            return outcomes;
        }

        let Some(base_id) = base_path
            .strip_prefix(&self.root)
            .ok()
            .and_then(identifier_from_relative)
        else {
            outcomes.push(reject(base_path, RejectionReason::InvalidName));
            return outcomes;
        };

        let both = complete.len() > 1;
        for (kind, source) in complete {
            let identifier = if both {
                DatabaseId::new(format!("{base_id}.{}", kind.identifier_suffix()))
            } else {
                DatabaseId::new(base_id.clone())
            };

            if let Some(first) = self.seen.get(&identifier) {
                outcomes.push(reject(
                    base_path.clone(),
                    RejectionReason::DuplicateIdentifier {
                        identifier,
                        first: first.clone(),
                    },
                ));
                continue;
            }
            self.seen.insert(identifier.clone(), base_path.clone());

            let metadata = match source {
                Source::Files => read_metadata(candidate, kind),
                Source::Volumes { alias, volumes } => volume_metadata(&alias, &volumes, kind),
            };
            let descriptor =
                DatabaseDescriptor::new(identifier.0, kind, base_path.clone(), self.scanned_at)
                    .with_title(metadata.title)
                    .with_counts(metadata.sequence_count, metadata.total_length)
                    .with_created(metadata.created);
            outcomes.push(ScanOutcome::Accepted(descriptor));
        }

        outcomes
    }
}

fn reject(path: PathBuf, reason: RejectionReason) -> ScanOutcome {
    ScanOutcome::Rejected(Rejection { path, reason })
}

/// Read metadata from the alias file, filling gaps from the index header.
///
/// Failures only leave fields absent.
fn read_metadata(candidate: &Candidate, kind: DatabaseKind) -> Metadata {
    let mut metadata = Metadata::default();
    if let Some(alias_path) = candidate.alias_path(kind) {
        match parse_alias_file(&alias_path) {
            Ok(alias) => metadata = Metadata::from_alias(&alias),
            Err(e) => warn!(
                "Ignoring unreadable alias file {}: {e}",
                alias_path.display()
            ),
        }
    }

    let index_path = candidate.index_path(kind);
    match parse_index_file(&index_path, kind) {
        Ok(header) => metadata.fill_from_header(header),
        Err(e) => debug!("No metadata from {}: {e}", index_path.display()),
    }
    metadata
}

/// Metadata of an alias-backed database.
///
/// Counts missing from the alias are summed over the volume headers, and only
/// when every header can be read.
fn volume_metadata(alias: &AliasFile, volumes: &[PathBuf], kind: DatabaseKind) -> Metadata {
    let mut metadata = Metadata::from_alias(alias);
    let headers: Vec<IndexHeader> = volumes
        .iter()
        .filter_map(|volume| volume_header(volume, kind))
        .collect();

    if headers.len() == volumes.len() {
        metadata.sequence_count = metadata
            .sequence_count
            .or_else(|| Some(headers.iter().map(|h| h.sequence_count).sum()));
        metadata.total_length = metadata
            .total_length
            .or_else(|| Some(headers.iter().map(|h| h.total_length).sum()));
    }
    if let Some(first) = headers.into_iter().next() {
        metadata.title = metadata.title.or(Some(first.title));
        metadata.created = Some(first.date);
    }
    metadata
}

fn volume_header(volume: &Path, kind: DatabaseKind) -> Option<IndexHeader> {
    let index_path = companion_file(volume, &extension(kind, "in"));
    parse_index_file(&index_path, kind)
        .map_err(|e| debug!("No metadata from {}: {e}", index_path.display()))
        .ok()
}
