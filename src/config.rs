use crate::services::cache::DEFAULT_CACHE_TTL_SECS;
use crate::services::maas::{DEFAULT_MAAS_BASE, DEFAULT_MAAS_TIMEOUT_SECS, DEFAULT_MAAS_USER_AGENT};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MAAS base address; `/` and `/{sol}` are appended to it.
    pub maas_base: String,
    pub maas_user_agent: String,
    pub maas_timeout_secs: u64,
    pub cache_ttl_secs: i64,
    pub port: u16,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            maas_base: lookup("MAAS_BASE").unwrap_or_else(|| DEFAULT_MAAS_BASE.to_string()),
            maas_user_agent: lookup("MAAS_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_MAAS_USER_AGENT.to_string()),
            maas_timeout_secs: parse_or(
                &lookup,
                "MAAS_TIMEOUT_SECS",
                DEFAULT_MAAS_TIMEOUT_SECS,
                "a positive integer",
                |secs| *secs > 0,
            )?,
            cache_ttl_secs: parse_or(
                &lookup,
                "CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
                "a positive number of seconds",
                |secs| *secs > 0 && chrono::Duration::try_seconds(*secs).is_some(),
            )?,
            port: parse_or(&lookup, "PORT", 8080, "a valid u16", |_| true)?,
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        })
    }
}

/// Parse `name` if set, falling back to `default`. Values that fail to parse
/// or fail `valid` are rejected.
fn parse_or<F, T, V>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
    valid: V,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    V: Fn(&T) -> bool,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) if valid(&parsed) => Ok(parsed),
        _ => Err(ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
