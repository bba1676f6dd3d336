use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::state::{DEFAULT_SEATS, MAX_SEATS};
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATA_DIR: &str = "./kubix-data";
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Server settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub lock_timeout: Duration,
    pub seats: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            lock_timeout: Duration::from_millis(DEFAULT_LOCK_TIMEOUT_MS),
            seats: DEFAULT_SEATS,
        }
    }
}

impl ServerConfig {
    /// Read `KUBIX_*` variables from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("KUBIX_HOST").unwrap_or(defaults.host);
        if host.trim().is_empty() {
            return Err(AppError::config("KUBIX_HOST must not be empty"));
        }

        let port = parse_var(&lookup, "KUBIX_PORT", defaults.port)?;

        let data_dir = lookup("KUBIX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let timeout_ms = parse_var(&lookup, "KUBIX_LOCK_TIMEOUT_MS", DEFAULT_LOCK_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            return Err(AppError::config("KUBIX_LOCK_TIMEOUT_MS must be greater than 0"));
        }

        let seats = parse_var(&lookup, "KUBIX_SEATS", defaults.seats)?;
        if !(DEFAULT_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(AppError::config(format!(
                "KUBIX_SEATS must be between {DEFAULT_SEATS} and {MAX_SEATS}, got {seats}"
            )));
        }

        Ok(Self {
            host,
            port,
            data_dir,
            lock_timeout: Duration::from_millis(timeout_ms),
            seats,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("{key}={raw:?} is invalid: {e}"))),
    }
}
