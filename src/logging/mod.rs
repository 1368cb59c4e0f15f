//! Diagnostic logging for startup and scanning.
//!
//! Lines look like:
//!
//! ```text
//! [2024-03-12 11:48:31] INFO  Found 4 database(s)
//! ```
//!
//! The verbosity flag picks the threshold: debug detail when verbose,
//! informational and above otherwise.

pub mod format;

use tracing_subscriber::EnvFilter;

pub use format::{format_line, DiagnosticFormat, TIMESTAMP_FORMAT};

/// Filter directives for a verbosity setting
#[must_use]
pub fn filter_directives(verbose: bool) -> &'static str {
    if verbose {
        "seqserver=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber writing diagnostic lines to stderr
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directives(verbose)))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(DiagnosticFormat)
        .init();
}
