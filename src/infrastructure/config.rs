//! Application configuration

use std::env;

use anyhow::{bail, Context, Result};

/// Deployment environment; controls how much error detail reaches clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => bail!("APP_ENV must be development, production or test, got '{other}'"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    pub environment: Environment,

    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Bearer token lifetime
    pub token_ttl_hours: i64,

    /// SQLite connection URL
    pub database_url: String,
    pub database_max_connections: u32,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET environment variable is required")?;

        Ok(Self {
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            environment: Environment::parse(
                &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            )?,
            jwt_secret,
            token_ttl_hours: lookup("TOKEN_TTL_HOURS")
                .unwrap_or_else(|| "24".to_string())
                .parse()
                .context("TOKEN_TTL_HOURS must be a whole number of hours")?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://vrarch.db".to_string()),
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Configuration for tests: in-memory database, fixed secret
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_port: 0,
            environment: Environment::Test,
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 1,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            cors_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).expect("config");
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.database_url, "sqlite://vrarch.db");
        assert_eq!(config.database_max_connections, 5);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(AppConfig::from_lookup(lookup(&[])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("JWT_SECRET", "")])).is_err());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .expect("config");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let result =
            AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret"), ("APP_ENV", "staging")]));
        assert!(result.is_err());
    }
}
