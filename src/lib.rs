//! # seqserver
//!
//! A startup-time registry of BLAST+ databases for a sequence search front end.
//!
//! A search service is only useful if it has something to search. `seqserver`
//! walks a configured database directory, recognizes BLAST+ databases by their
//! companion index files, reads whatever metadata they carry, and publishes the
//! result as an immutable catalog. Startup refuses to complete without a
//! configuration and at least one valid database.
//!
//! ## Features
//!
//! - **Companion-set validation**: A database needs its complete header, index and
//!   sequence files; partial sets are rejected, not guessed at
//! - **Nucleotide and protein**: Both kinds are recognized, even under one base name
//! - **Optional metadata**: Titles and counts come from alias files or index headers;
//!   unreadable metadata never drops a database
//! - **Atomic snapshots**: Readers always see one complete catalog
//! - **Fail-fast startup**: Missing configuration, an unreadable directory, or an
//!   empty catalog stop startup with a clear diagnostic
//!
//! ## Example
//!
//! ```rust,no_run
//! use seqserver::bootstrap::{init, StartupOptions};
//! use std::path::PathBuf;
//!
//! let started = init(StartupOptions::new(
//!     Some(PathBuf::from("/etc/seqserver.conf")),
//!     None,
//! ))
//! .unwrap();
//!
//! for db in started.registry.all().iter() {
//!     println!("{} ({}): {}", db.identifier, db.kind, db.title);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`bootstrap`]: Configuration resolution and the fail-fast startup sequence
//! - [`catalog`]: Catalog snapshots and the shared registry
//! - [`core`]: Core data types for databases
//! - [`discovery`]: Directory scanning and database validation
//! - [`parsing`]: Parsers for alias files and index headers
//! - [`logging`]: Diagnostic line formatting
//! - [`cli`]: Command-line interface implementation

pub mod bootstrap;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod discovery;
pub mod logging;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use bootstrap::{init, BootstrapError, Bootstrapped, StartupOptions};
pub use catalog::registry::DatabaseRegistry;
pub use catalog::store::DatabaseCatalog;
pub use crate::core::descriptor::DatabaseDescriptor;
pub use crate::core::types::*;
pub use discovery::scanner::{ScanReport, Scanner};
