//! Centralized configuration (environment variables + defaults).
//!
//! `.env` is loaded first when present, so a checked-out repo can run with a local file.

use anyhow::{anyhow, Context, Result};
use std::str::FromStr;

use crate::app::catalog_service::DEFAULT_LARGE_LIMIT_WARN;

/// Which store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    /// Nothing persists past the process.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub db_max_connections: u32,
    /// Page sizes above this are logged (but still served).
    pub large_limit_warn: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment, in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?.max(1);
        let large_limit_warn = parse_or(&lookup, "LARGE_LIMIT_WARN", DEFAULT_LARGE_LIMIT_WARN)?;

        let backend = lookup("CATALOG_STORE").unwrap_or_else(|| "postgres".to_string());
        let store = match backend.trim().to_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                // Database URL must be provided (no default) for safety.
                database_url: lookup("DATABASE_URL")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| anyhow!("DATABASE_URL must be set when CATALOG_STORE=postgres"))?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(anyhow!(
                    "CATALOG_STORE must be 'postgres' or 'memory' (got '{}')",
                    other
                ))
            }
        };

        Ok(Self {
            host,
            port,
            store,
            db_max_connections,
            large_limit_warn,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value '{}'", key, raw)),
        None => Ok(default),
    }
}
