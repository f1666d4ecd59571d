//! Service configuration loaded from environment variables.
//!
//! | Variable              | Default          |
//! |-----------------------|------------------|
//! | `HEIR_BIND_ADDR`      | `127.0.0.1:8080` |
//! | `HEIR_LOG_LEVEL`      | `info`           |
//! | `HEIR_LOG_FORMAT`     | `text`           |
//! | `HEIR_VACANT_SIDE`    | `accrue`         |
//! | `HEIR_ALLOWED_ORIGIN` | `*`              |

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use heir_core::VacantSidePolicy;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Origin value meaning "any origin".
pub const ANY_ORIGIN: &str = "*";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format: {other} (expected text or json)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Log level filter string (e.g. "info", "heir_core=debug").
    pub log_level: String,
    pub log_format: LogFormat,
    /// Handling of a parent side without heirs.
    pub vacant_side: VacantSidePolicy,
    /// CORS origin, or `*` for any.
    pub allowed_origin: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            vacant_side: VacantSidePolicy::default(),
            allowed_origin: ANY_ORIGIN.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = lookup("HEIR_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let log_level = lookup("HEIR_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match lookup("HEIR_LOG_FORMAT") {
            Some(v) => v.parse().context("HEIR_LOG_FORMAT must be text or json")?,
            None => defaults.log_format,
        };

        let vacant_side = match lookup("HEIR_VACANT_SIDE") {
            Some(v) => v
                .parse::<VacantSidePolicy>()
                .map_err(|e| anyhow!(e))
                .context("HEIR_VACANT_SIDE must be accrue or retain")?,
            None => defaults.vacant_side,
        };

        let allowed_origin = lookup("HEIR_ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin);

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            vacant_side,
            allowed_origin,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origin.trim() == ANY_ORIGIN
    }
}
