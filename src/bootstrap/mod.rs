//! Startup of the database catalog.
//!
//! Bootstrap is fail-fast: the application must never run without at least one
//! queryable database. It moves through four states:
//!
//! ```text
//! Start ──► ConfigResolved ──► Scanned ──► Ready
//!   │             │               │
//!   └─────────────┴───────────────┴──► Aborted
//! ```
//!
//! | Transition | Requires | Failure |
//! |------------|----------|---------|
//! | Start → ConfigResolved | readable config file and a `database_dir` | configuration missing |
//! | ConfigResolved → Scanned | readable database directory | database directory unreadable |
//! | Scanned → Ready | at least one valid database | no usable database found |
//!
//! Failures are returned as [`BootstrapError`]; only the binary's entry point
//! exits the process.
//!
//! ## Example
//!
//! ```rust,no_run
//! use seqserver::bootstrap::{init, StartupOptions};
//! use std::path::PathBuf;
//!
//! let options = StartupOptions::new(
//!     Some(PathBuf::from("/etc/seqserver.conf")),
//!     Some(PathBuf::from("/srv/blastdb")),
//! );
//!
//! match init(options) {
//!     Ok(started) => println!("{} databases ready", started.registry.len()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! [`BootstrapError`]: controller::BootstrapError

pub mod config;
pub mod controller;

pub use config::{Config, ConfigError, StartupOptions};
pub use controller::{init, Bootstrap, BootstrapError, BootstrapState, Bootstrapped};
