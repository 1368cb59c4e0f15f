use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::store::{CatalogError, DatabaseCatalog};
use crate::core::descriptor::DatabaseDescriptor;
use crate::core::types::DatabaseId;
use crate::discovery::scanner::{ScanError, Scanner};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Unknown database: {0}")]
    NotFound(DatabaseId),

    #[error("Rescan of {} found no usable database; keeping the current catalog", root.display())]
    EmptyRescan { root: PathBuf },

    #[error("Rescan failed")]
    Scan(#[from] ScanError),
}

/// Outcome of a rescan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanOutcome {
    /// A new catalog was installed
    Replaced { databases: usize, rejected: usize },
    /// Another rescan was in progress; nothing was done
    AlreadyRunning,
}

/// The process-wide catalog of databases.
///
/// Readers take a snapshot with [`DatabaseRegistry::all`] and never observe a
/// partially built catalog: replacement swaps the whole snapshot at once.
#[derive(Debug)]
pub struct DatabaseRegistry {
    current: ArcSwap<DatabaseCatalog>,
    populating: AtomicBool,
}

impl DatabaseRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(DatabaseCatalog::new()),
            populating: AtomicBool::new(false),
        }
    }

    /// Atomically install a new set of databases
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Catalog` if identifiers are not unique; the
    /// current snapshot is left untouched.
    pub fn replace_all(&self, databases: Vec<DatabaseDescriptor>) -> Result<(), RegistryError> {
        let catalog = DatabaseCatalog::from_descriptors(databases)?;
        debug!("Installing catalog of {} database(s)", catalog.len());
        self.current.store(Arc::new(catalog));
        Ok(())
    }

    /// The current snapshot
    pub fn all(&self) -> Arc<DatabaseCatalog> {
        self.current.load_full()
    }

    /// Look up a database by identifier
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no database has this identifier.
    pub fn find(&self, identifier: &str) -> Result<DatabaseDescriptor, RegistryError> {
        self.current
            .load()
            .get(identifier)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(DatabaseId::new(identifier)))
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    /// Rescan and install the result.
    ///
    /// At most one rescan runs at a time; a concurrent request returns
    /// [`RescanOutcome::AlreadyRunning`] immediately. A rescan that finds no
    /// usable database leaves the current snapshot in place.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Scan` if the root cannot be read and
    /// `RegistryError::EmptyRescan` if it holds no valid database.
    pub fn rescan(&self, scanner: &Scanner) -> Result<RescanOutcome, RegistryError> {
        let Some(_guard) = PopulationGuard::acquire(&self.populating) else {
            debug!("Rescan already in progress; ignoring request");
            return Ok(RescanOutcome::AlreadyRunning);
        };

        let report = scanner.scan()?;
        if report.is_empty() {
            return Err(RegistryError::EmptyRescan { root: report.root });
        }

        let databases = report.accepted.len();
        let rejected = report.rejected.len();
        self.replace_all(report.accepted)?;
        info!("Rescan installed {databases} database(s)");

        Ok(RescanOutcome::Replaced {
            databases,
            rejected,
        })
    }
}

impl Default for DatabaseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the population flag; cleared on drop, including on error paths
struct PopulationGuard<'a>(&'a AtomicBool);

impl<'a> PopulationGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PopulationGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DatabaseKind;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn db(id: &str) -> DatabaseDescriptor {
        DatabaseDescriptor::new(id, DatabaseKind::Nucleotide, format!("/db/{id}"), Utc::now())
    }

    fn make_db(root: &std::path::Path, base: &str) {
        for ext in ["nhr", "nin", "nsq"] {
            fs::write(root.join(format!("{base}.{ext}")), b"").unwrap();
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = DatabaseRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn test_replace_all_and_find() {
        let registry = DatabaseRegistry::new();
        registry.replace_all(vec![db("a"), db("b")]).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("b").unwrap().identifier.as_str(), "b");
        assert!(matches!(
            registry.find("c"),
            Err(RegistryError::NotFound(id)) if id.as_str() == "c"
        ));
    }

    #[test]
    fn test_failed_replace_keeps_snapshot() {
        let registry = DatabaseRegistry::new();
        registry.replace_all(vec![db("a")]).unwrap();

        let result = registry.replace_all(vec![db("x"), db("x")]);
        assert!(matches!(
            result,
            Err(RegistryError::Catalog(CatalogError::DuplicateIdentifier(_)))
        ));
        assert!(registry.find("a").is_ok());
    }

    #[test]
    fn test_old_snapshot_survives_replacement() {
        let registry = DatabaseRegistry::new();
        registry.replace_all(vec![db("a")]).unwrap();
        let before = registry.all();

        registry.replace_all(vec![db("b"), db("c")]).unwrap();

        assert_eq!(before.len(), 1);
        assert!(before.get("a").is_some());
        assert_eq!(registry.all().len(), 2);
    }

    #[test]
    fn test_rescan_replaces_catalog() {
        let dir = TempDir::new().unwrap();
        make_db(dir.path(), "one");

        let registry = DatabaseRegistry::new();
        let scanner = Scanner::new(dir.path());
        registry.rescan(&scanner).unwrap();
        assert_eq!(registry.len(), 1);

        make_db(dir.path(), "two");
        let outcome = registry.rescan(&scanner).unwrap();
        assert_eq!(
            outcome,
            RescanOutcome::Replaced {
                databases: 2,
                rejected: 0
            }
        );
        assert!(registry.find("two").is_ok());
    }

    #[test]
    fn test_empty_rescan_keeps_catalog() {
        let dir = TempDir::new().unwrap();
        let registry = DatabaseRegistry::new();
        registry.replace_all(vec![db("kept")]).unwrap();

        let result = registry.rescan(&Scanner::new(dir.path()));
        assert!(matches!(result, Err(RegistryError::EmptyRescan { .. })));
        assert!(registry.find("kept").is_ok());
    }

    #[test]
    fn test_concurrent_rescan_is_refused() {
        let dir = TempDir::new().unwrap();
        make_db(dir.path(), "one");
        let registry = DatabaseRegistry::new();

        let guard = PopulationGuard::acquire(&registry.populating).unwrap();
        let outcome = registry.rescan(&Scanner::new(dir.path())).unwrap();
        assert_eq!(outcome, RescanOutcome::AlreadyRunning);
        assert!(registry.is_empty());

        drop(guard);
        registry.rescan(&Scanner::new(dir.path())).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_guard_released_after_error() {
        let dir = TempDir::new().unwrap();
        let registry = DatabaseRegistry::new();

        assert!(registry.rescan(&Scanner::new(dir.path().join("missing"))).is_err());
        assert!(!registry.populating.load(Ordering::Acquire));
    }
}
