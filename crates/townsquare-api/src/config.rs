//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind, `HOST`.
    pub host: String,
    /// Port to bind, `PORT`.
    pub port: u16,
    /// Directory of script files, `SCRIPTS_DIR`.
    pub scripts_dir: PathBuf,
    /// Directory of layouts, `LAYOUTS_DIR`.
    pub layouts_dir: PathBuf,
}

impl AppConfig {
    /// Reads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, applying defaults for unset
    /// keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid `u16`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let scripts_dir = lookup("SCRIPTS_DIR").unwrap_or_else(|| "scripts".to_string());
        let layouts_dir = lookup("LAYOUTS_DIR").unwrap_or_else(|| "layouts".to_string());
        Ok(Self {
            host,
            port,
            scripts_dir: scripts_dir.into(),
            layouts_dir: layouts_dir.into(),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` is not an IP address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
