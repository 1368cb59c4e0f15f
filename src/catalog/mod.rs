//! The in-memory catalog of discovered databases.
//!
//! The catalog is rebuilt from the filesystem at every startup; nothing is
//! persisted. It has two layers:
//!
//! - [`DatabaseCatalog`]: an immutable snapshot of descriptors indexed by identifier
//! - [`DatabaseRegistry`]: the shared handle that publishes snapshots to readers
//!
//! ## Snapshots
//!
//! Readers call [`DatabaseRegistry::all`] and keep the returned `Arc` for as
//! long as they need a consistent view. Replacing the catalog swaps the whole
//! snapshot, so a reader sees either the old set or the new one.
//!
//! ```rust,no_run
//! use seqserver::catalog::registry::DatabaseRegistry;
//! use seqserver::discovery::scanner::Scanner;
//!
//! let registry = DatabaseRegistry::new();
//! registry.rescan(&Scanner::new("/srv/blastdb")).unwrap();
//!
//! for db in registry.all().iter() {
//!     println!("{}", db.identifier);
//! }
//!
//! let genome = registry.find("genome/Solenopsis_invicta");
//! ```
//!
//! [`DatabaseCatalog`]: store::DatabaseCatalog
//! [`DatabaseRegistry`]: registry::DatabaseRegistry
//! [`DatabaseRegistry::all`]: registry::DatabaseRegistry::all

pub mod registry;
pub mod store;
