use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::bootstrap::config::{self, Config, ConfigError, StartupOptions};
use crate::catalog::registry::{DatabaseRegistry, RegistryError};
use crate::discovery::scanner::{ScanError, ScanReport, Scanner};

/// Fatal startup errors
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("configuration missing")]
    ConfigurationMissing(#[from] ConfigError),

    #[error("database directory unreadable")]
    DirectoryUnreadable(#[from] ScanError),

    #[error("no usable database found in {} ({rejected} candidate(s) rejected)", dir.display())]
    NoDatabasesFound { dir: PathBuf, rejected: usize },

    #[error("catalog could not be installed")]
    Registry(#[from] RegistryError),
}

impl BootstrapError {
    /// Process exit status for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigurationMissing(_) => 2,
            Self::DirectoryUnreadable(_) => 3,
            Self::NoDatabasesFound { .. } => 4,
            Self::Registry(_) => 1,
        }
    }

    #[must_use]
    pub fn reason(&self) -> AbortReason {
        match self {
            Self::ConfigurationMissing(_) => AbortReason::ConfigurationMissing,
            Self::DirectoryUnreadable(_) => AbortReason::DirectoryUnreadable,
            Self::NoDatabasesFound { .. } => AbortReason::NoDatabasesFound,
            Self::Registry(_) => AbortReason::InstallFailed,
        }
    }
}

/// Why bootstrap stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    ConfigurationMissing,
    DirectoryUnreadable,
    NoDatabasesFound,
    InstallFailed,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationMissing => write!(f, "configuration missing"),
            Self::DirectoryUnreadable => write!(f, "database directory unreadable"),
            Self::NoDatabasesFound => write!(f, "no usable database found"),
            Self::InstallFailed => write!(f, "catalog could not be installed"),
        }
    }
}

/// Non-terminal states from which bootstrap can abort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    Start,
    ConfigResolved,
    Scanned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Start,
    ConfigResolved,
    Scanned,
    Ready,
    Aborted {
        from: BootstrapStage,
        reason: AbortReason,
    },
}

impl BootstrapState {
    fn stage(self) -> Option<BootstrapStage> {
        match self {
            Self::Start => Some(BootstrapStage::Start),
            Self::ConfigResolved => Some(BootstrapStage::ConfigResolved),
            Self::Scanned => Some(BootstrapStage::Scanned),
            Self::Ready | Self::Aborted { .. } => None,
        }
    }
}

/// A successfully started catalog
#[derive(Debug)]
pub struct Bootstrapped {
    pub config: Config,
    pub registry: Arc<DatabaseRegistry>,
    pub report: ScanReport,
}

/// Drives startup: `Start → ConfigResolved → Scanned → Ready`.
///
/// Any failure moves to `Aborted` and is returned as a [`BootstrapError`].
/// Nothing here terminates the process; that is left to the caller.
#[derive(Debug)]
pub struct Bootstrap {
    options: StartupOptions,
    state: BootstrapState,
}

impl Bootstrap {
    pub fn new(options: StartupOptions) -> Self {
        Self {
            options,
            state: BootstrapState::Start,
        }
    }

    #[must_use]
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Run every step and install the registry
    ///
    /// # Errors
    ///
    /// Returns the `BootstrapError` of the first step that fails.
    pub fn run(&mut self) -> Result<Bootstrapped, BootstrapError> {
        let config = self.resolve_config()?;
        let report = self.scan(&config)?;
        let registry = self.install(&report)?;

        Ok(Bootstrapped {
            config,
            registry,
            report,
        })
    }

    /// `Start → ConfigResolved`
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::ConfigurationMissing` if the configuration
    /// cannot be resolved.
    pub fn resolve_config(&mut self) -> Result<Config, BootstrapError> {
        self.expect_state(BootstrapState::Start);

        match config::resolve(&self.options) {
            Ok(config) => {
                debug!(
                    "Using configuration {} with database directory {}",
                    config.config_file.display(),
                    config.database_dir.display()
                );
                self.transition(BootstrapState::ConfigResolved);
                Ok(config)
            }
            Err(e) => Err(self.abort(e.into())),
        }
    }

    /// `ConfigResolved → Scanned`
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::DirectoryUnreadable` if the database directory
    /// cannot be read.
    pub fn scan(&mut self, config: &Config) -> Result<ScanReport, BootstrapError> {
        self.expect_state(BootstrapState::ConfigResolved);

        info!("Scanning {} for databases", config.database_dir.display());
        match Scanner::new(&config.database_dir).scan() {
            Ok(report) => {
                self.transition(BootstrapState::Scanned);
                Ok(report)
            }
            Err(e) => Err(self.abort(e.into())),
        }
    }

    /// `Scanned → Ready`
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::NoDatabasesFound` if the scan accepted nothing,
    /// however many candidates it rejected.
    pub fn install(&mut self, report: &ScanReport) -> Result<Arc<DatabaseRegistry>, BootstrapError> {
        self.expect_state(BootstrapState::Scanned);

        if report.is_empty() {
            return Err(self.abort(BootstrapError::NoDatabasesFound {
                dir: report.root.clone(),
                rejected: report.rejected.len(),
            }));
        }

        let registry = DatabaseRegistry::new();
        if let Err(e) = registry.replace_all(report.accepted.clone()) {
            return Err(self.abort(e.into()));
        }

        info!("Found {} database(s)", registry.len());
        self.transition(BootstrapState::Ready);
        Ok(Arc::new(registry))
    }

    fn expect_state(&self, expected: BootstrapState) {
        debug_assert_eq!(
            self.state, expected,
            "bootstrap step called out of order"
        );
    }

    fn transition(&mut self, next: BootstrapState) {
        debug!("Bootstrap: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn abort(&mut self, error: BootstrapError) -> BootstrapError {
        let from = self.state.stage().unwrap_or(BootstrapStage::Start);
        self.transition(BootstrapState::Aborted {
            from,
            reason: error.reason(),
        });
        error
    }
}

/// Resolve configuration, scan, and install the registry in one call
///
/// # Errors
///
/// Returns the first fatal `BootstrapError`.
pub fn init(options: StartupOptions) -> Result<Bootstrapped, BootstrapError> {
    Bootstrap::new(options).run()
}
