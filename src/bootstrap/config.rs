use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::validation::is_blank;

/// File name of the default configuration file in the home directory
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".seqserver.conf";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no configuration file given and no home directory to look in")]
    NoConfigFile,

    #[error("cannot read configuration file {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file {}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("database_dir not set (neither in {} nor on the command line)", path.display())]
    NoDatabaseDir { path: PathBuf },
}

/// Raw startup inputs, typically from command-line flags
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_file: Option<PathBuf>,
    pub database_dir: Option<PathBuf>,
}

impl StartupOptions {
    pub fn new(config_file: Option<PathBuf>, database_dir: Option<PathBuf>) -> Self {
        Self {
            config_file,
            database_dir,
        }
    }
}

/// Contents of the YAML configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub database_dir: Option<String>,
    #[serde(default)]
    pub num_threads: Option<u32>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub config_file: PathBuf,
    pub database_dir: PathBuf,
    /// Carried for the search front end; not used by the catalog
    pub num_threads: Option<u32>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `~/.seqserver.conf`, if a home directory can be determined
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE_NAME))
}

/// Resolve the configuration from startup options.
///
/// Reads the configuration file and nothing else; the database directory is
/// not touched.
///
/// # Errors
///
/// Returns `ConfigError` if no configuration file is given, it cannot be read
/// or parsed, or no database directory results.
pub fn resolve(options: &StartupOptions) -> Result<Config, ConfigError> {
    let config_file = options.config_file.clone().ok_or(ConfigError::NoConfigFile)?;

    let text = std::fs::read_to_string(&config_file).map_err(|source| ConfigError::Unreadable {
        path: config_file.clone(),
        source,
    })?;
    let document = parse_config_text(&text).map_err(|source| ConfigError::Invalid {
        path: config_file.clone(),
        source,
    })?;

    let database_dir = options
        .database_dir
        .as_deref()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| {
            document
                .database_dir
                .as_deref()
                .filter(|dir| !is_blank(dir))
                .map(|dir| expand_home(dir.trim()))
        })
        .ok_or_else(|| ConfigError::NoDatabaseDir {
            path: config_file.clone(),
        })?;

    Ok(Config {
        config_file,
        database_dir,
        num_threads: document.num_threads,
        host: document.host,
        port: document.port,
    })
}

/// Parse configuration text; an empty or comment-only document has no keys
///
/// # Errors
///
/// Returns the YAML error if the document is not a mapping of known value types.
pub fn parse_config_text(text: &str) -> Result<ConfigDocument, serde_yaml::Error> {
    let has_content = text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#') && line != "---"
    });
    if !has_content {
        return Ok(ConfigDocument::default());
    }
    serde_yaml::from_str(text)
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
