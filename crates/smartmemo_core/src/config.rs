//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve storage, logging and server settings for every entry point.
//!
//! # Invariants
//! - Blank environment values behave as unset.
//! - Resolution never fails; unusable values fall back to defaults.

use crate::logging::default_log_level;
use log::warn;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SMARTMEMO_DB_PATH";
pub const LOG_DIR_ENV: &str = "SMARTMEMO_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "SMARTMEMO_LOG_LEVEL";
pub const SERVER_ADDR_ENV: &str = "SMARTMEMO_SERVER_ADDR";

const DEFAULT_DB_FILE_NAME: &str = "smartmemo.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "smartmemo-logs";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub server_addr: SocketAddr,
}

impl AppConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to its
    /// raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = read(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        let log_level = read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());
        let server_addr = read(SERVER_ADDR_ENV)
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(err) => {
                    warn!("event=config_resolve module=config status=error key={SERVER_ADDR_ENV} error={err}");
                    None
                }
            })
            .unwrap_or_else(default_server_addr);

        Self {
            db_path,
            log_dir,
            log_level,
            server_addr,
        }
    }

    /// Log directory as UTF-8 text, the shape `init_logging` accepts.
    pub fn log_dir_str(&self) -> String {
        self.log_dir.to_string_lossy().into_owned()
    }
}

fn default_server_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}
