use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::descriptor::DatabaseDescriptor;
use crate::discovery::companion::{split_companion, Candidate};
use crate::discovery::validator::{Rejection, RejectionReason, ScanOutcome, Validator};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

/// Everything a completed scan found
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Canonical scan root
    pub root: PathBuf,
    pub accepted: Vec<DatabaseDescriptor>,
    pub rejected: Vec<Rejection>,
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Walks a database directory looking for BLAST+ databases
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check the root and group companion files into candidates.
    ///
    /// Returns the canonical root together with the candidates ordered by
    /// (directory, base name).
    ///
    /// # Errors
    ///
    /// Returns `ScanError::RootUnreadable` if the root does not exist or cannot
    /// be listed, and `ScanError::NotADirectory` if it is a file.
    pub fn candidates(&self) -> Result<(PathBuf, Vec<Candidate>), ScanError> {
        let root = self.open_root()?;

        let mut groups: BTreeMap<(PathBuf, OsString), BTreeSet<String>> = BTreeMap::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path under {}: {e}", root.display());
                    continue;
                }
            };

            let file_type = entry.file_type();
            let is_file =
                file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let path = entry.path();
            let Some((stem, ext)) = split_companion(path) else {
                continue;
            };
            let Some(directory) = path.parent() else {
                continue;
            };

            groups
                .entry((directory.to_path_buf(), stem.to_os_string()))
                .or_default()
                .insert(ext.to_string());
        }

        let candidates = groups
            .into_iter()
            .map(|((directory, base_name), extensions)| Candidate {
                directory,
                base_name,
                extensions,
            })
            .collect();

        Ok((root, candidates))
    }

    /// Lazily validate candidates, one outcome per (candidate, kind).
    ///
    /// Alias files are resolved against all candidates up front; everything
    /// else is validated as the iterator is consumed.
    ///
    /// # Errors
    ///
    /// Fails only if the root itself cannot be read; see [`Scanner::candidates`].
    pub fn outcomes(&self) -> Result<Outcomes, ScanError> {
        let (root, candidates) = self.candidates()?;
        debug!(
            "Found {} candidate(s) under {}",
            candidates.len(),
            root.display()
        );

        let scanned_at = Utc::now();
        let mut validator = Validator::new(root.clone(), scanned_at);
        validator.index(&candidates);

        Ok(Outcomes {
            root,
            scanned_at,
            validator,
            candidates: candidates.into_iter(),
            pending: VecDeque::new(),
        })
    }

    /// Run a full scan and collect the results
    ///
    /// # Errors
    ///
    /// Fails only if the root itself cannot be read; see [`Scanner::candidates`].
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let outcomes = self.outcomes()?;
        let root = outcomes.root.clone();
        let scanned_at = outcomes.scanned_at;

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for outcome in outcomes {
            match outcome {
                ScanOutcome::Accepted(db) => accepted.push(db),
                ScanOutcome::Rejected(r) => rejected.push(r),
            }
        }

        info!(
            "Scanned {}: {} database(s), {} rejected candidate(s)",
            root.display(),
            accepted.len(),
            rejected.len()
        );

        Ok(ScanReport {
            root,
            accepted,
            rejected,
            scanned_at,
        })
    }

    fn open_root(&self) -> Result<PathBuf, ScanError> {
        let unreadable = |source| ScanError::RootUnreadable {
            path: self.root.clone(),
            source,
        };

        let root = std::fs::canonicalize(&self.root).map_err(unreadable)?;
        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        // Surface permission problems on the root itself instead of as a skipped entry
        std::fs::read_dir(&root).map_err(unreadable)?;
        Ok(root)
    }
}

/// Iterator over validation outcomes, produced by [`Scanner::outcomes`]
pub struct Outcomes {
    root: PathBuf,
    scanned_at: DateTime<Utc>,
    validator: Validator,
    candidates: std::vec::IntoIter<Candidate>,
    pending: VecDeque<ScanOutcome>,
}

impl Outcomes {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for Outcomes {
    type Item = ScanOutcome;

    fn next(&mut self) -> Option<ScanOutcome> {
        loop {
            if let Some(outcome) = self.pending.pop_front() {
                log_outcome(&outcome);
                return Some(outcome);
            }
            let candidate = self.candidates.next()?;
            self.pending.extend(self.validator.validate(&candidate));
        }
    }
}

fn log_outcome(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::Accepted(db) => {
            debug!("Found {} database {} at {}", db.kind, db.identifier, db.path.display());
        }
        ScanOutcome::Rejected(rejection) => match rejection.reason {
            RejectionReason::IncompleteIndex { .. }
            | RejectionReason::UnresolvedVolumes { .. }
            | RejectionReason::DuplicateIdentifier { .. } => {
                warn!("Rejected {rejection}");
            }
            RejectionReason::NotADatabase | RejectionReason::InvalidName => {
                debug!("Rejected {rejection}");
            }
        },
    }
}
