//! Discovery of BLAST+ databases under a directory tree.
//!
//! Discovery runs in two steps:
//!
//! 1. The [`Scanner`] walks the database directory and groups files sharing a
//!    directory and base name into [`Candidate`]s. Only files with a recognized
//!    companion extension take part; everything else is ignored.
//! 2. The [`Validator`] checks each candidate for a complete companion index
//!    set per molecule type, reads optional metadata, and produces either a
//!    [`DatabaseDescriptor`] or a [`Rejection`].
//!
//! A malformed candidate never fails the scan. Only an unreadable root does.
//!
//! ## Example
//!
//! ```rust,no_run
//! use seqserver::discovery::scanner::Scanner;
//!
//! let report = Scanner::new("/srv/blastdb").scan().unwrap();
//! for db in &report.accepted {
//!     println!("{} [{}]", db.identifier, db.kind);
//! }
//! for rejection in &report.rejected {
//!     println!("skipped {rejection}");
//! }
//! ```
//!
//! [`Scanner`]: scanner::Scanner
//! [`Candidate`]: companion::Candidate
//! [`Validator`]: validator::Validator
//! [`Rejection`]: validator::Rejection
//! [`DatabaseDescriptor`]: crate::core::descriptor::DatabaseDescriptor

pub mod companion;
pub mod scanner;
pub mod validator;
