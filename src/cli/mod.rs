//! Command-line interface for seqserver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **databases**: List or show the databases found under the database directory
//! - **scan**: Report every candidate, accepted or rejected, without requiring a usable database
//! - **check**: Run the startup checks and report whether the catalog is ready
//!
//! ## Usage
//!
//! ```text
//! # List databases using ~/.seqserver.conf
//! seqserver databases list
//!
//! # Point at a database directory explicitly
//! seqserver -d /srv/blastdb databases list --format json
//!
//! # Find out why a database is missing from the list
//! seqserver -d /srv/blastdb scan --rejected
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bootstrap::config::{default_config_path, StartupOptions};

pub mod check;
pub mod databases;
pub mod scan;

#[derive(Parser)]
#[command(name = "seqserver")]
#[command(version)]
#[command(about = "Discover and catalog BLAST+ databases for sequence search")]
#[command(
    long_about = "seqserver finds the BLAST+ databases under a database directory and builds the catalog a search front end serves from.\n\nStartup is fail-fast: without a configuration file, a database directory, and at least one complete database, it exits with a single diagnostic line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML) [default: ~/.seqserver.conf]
    #[arg(short, long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Directory containing BLAST+ databases (overrides the configuration file)
    #[arg(short, long, global = true)]
    pub database_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    /// Startup options, falling back to the default configuration file
    #[must_use]
    pub fn startup_options(&self) -> StartupOptions {
        StartupOptions::new(
            self.config_file.clone().or_else(default_config_path),
            self.database_dir.clone(),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with the catalog of databases
    Databases(databases::DatabasesArgs),

    /// Scan the database directory and report accepted and rejected candidates
    Scan(scan::ScanArgs),

    /// Check that startup succeeds
    Check,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Format an optional count for display
pub(crate) fn display_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "seqserver",
            "databases",
            "list",
            "--database-dir",
            "/srv/blastdb",
            "-c",
            "/etc/seqserver.conf",
            "-v",
        ]);
        let options = cli.startup_options();
        assert_eq!(options.database_dir, Some(PathBuf::from("/srv/blastdb")));
        assert_eq!(
            options.config_file,
            Some(PathBuf::from("/etc/seqserver.conf"))
        );
        assert!(cli.verbose);
    }

    #[test]
    fn test_display_count() {
        assert_eq!(display_count(Some(12)), "12");
        assert_eq!(display_count(None), "-");
    }
}
