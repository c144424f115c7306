use std::time::Duration;

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub refresh_interval: Duration,
    pub storage_public_url: String,
    pub admin_password: String,
    pub db_max_connections: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing required environment variable {key}"),
            ConfigError::Invalid { key, value } => write!(f, "Invalid value for {key}: '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REFRESH_SECS: u64 = 30;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine; real deployments set the variables directly.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Used by `from_env` and tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let refresh_secs = parse_or(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_SECS)?;
        if refresh_secs == 0 {
            return Err(ConfigError::Invalid { key: "REFRESH_INTERVAL_SECS", value: "0".to_string() });
        }

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: lookup("SESSION_KEY"),
            refresh_interval: Duration::from_secs(refresh_secs),
            storage_public_url: lookup("STORAGE_PUBLIC_URL").unwrap_or_default(),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 8)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/jourj")]))
            .expect("config");
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.db_max_connections, 8);
        assert!(cfg.session_key.is_none());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn bad_refresh_interval_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/jourj"),
            ("REFRESH_INTERVAL_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REFRESH_INTERVAL_SECS", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/jourj"),
            ("REFRESH_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
