//! Server settings from environment variables (optionally via `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Pool size for file-backed stores. In-memory stores always use one connection.
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub seed_on_start: bool,
    /// Seed fixture file; the embedded fixture is used when unset.
    pub seed_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            seed_on_start: true,
            seed_path: None,
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string())?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", &DEFAULT_BODY_LIMIT_BYTES.to_string())?;
        let seed_on_start = match lookup("SEED_ON_START") {
            None => true,
            Some(v) => parse_bool("SEED_ON_START", &v)?,
        };
        let seed_path = lookup("SEED_PATH").filter(|s| !s.trim().is_empty()).map(PathBuf::from);
        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
            body_limit_bytes,
            seed_on_start,
            seed_path,
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}
