//! Configuration for the listener and emitter processes

use medpipe_common::env::{parse_or, var_or};
use medpipe_common::EnvError;
use std::time::Duration;

// ============================================================================
// Listener Configuration Constants
// ============================================================================

pub const DEFAULT_LISTENER_HOST: &str = "0.0.0.0";

pub const DEFAULT_LISTENER_PORT: u16 = 8000;

/// The single user the listener knows about at startup.
pub const DEFAULT_SEED_USER: &str = "123";

pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "*";

// ============================================================================
// Emitter Configuration Constants
// ============================================================================

/// Update endpoint as seen from the emitter container.
pub const DEFAULT_EMITTER_TARGET_URL: &str = "http://listener:8000/internal/update";

pub const DEFAULT_EMITTER_INTERVAL_SECS: u64 = 10;

/// Upper bound on one post, so a stalled listener cannot hold the loop
pub const DEFAULT_EMITTER_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
    pub seed_user: String,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    /// Ignored when any origin is allowed
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl ListenerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// `LISTENER_HOST`, `LISTENER_PORT`, `LISTENER_SEED_USER`,
    /// `CORS_ALLOWED_ORIGINS` (comma separated), `CORS_ALLOW_CREDENTIALS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            host: var_or("LISTENER_HOST", DEFAULT_LISTENER_HOST),
            port: parse_or("LISTENER_PORT", DEFAULT_LISTENER_PORT)?,
            seed_user: var_or("LISTENER_SEED_USER", DEFAULT_SEED_USER),
            cors: CorsConfig {
                allowed_origins: var_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGINS)
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: parse_or("CORS_ALLOW_CREDENTIALS", true)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid(
                "Listener port must be greater than 0".to_string(),
            ));
        }
        if self.seed_user.is_empty() {
            return Err(ConfigError::Invalid("Seed user id cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LISTENER_HOST.to_string(),
            port: DEFAULT_LISTENER_PORT,
            seed_user: DEFAULT_SEED_USER.to_string(),
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGINS.to_string()],
                allow_credentials: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmitterConfig {
    pub target_url: String,
    pub interval: Duration,
    pub request_timeout: Duration,
    pub user_id: String,
}

impl EmitterConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// `EMITTER_TARGET_URL`, `EMITTER_INTERVAL_SECS`, `EMITTER_TIMEOUT_SECS`,
    /// `EMITTER_USER_ID`
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            target_url: var_or("EMITTER_TARGET_URL", DEFAULT_EMITTER_TARGET_URL),
            interval: Duration::from_secs(parse_or(
                "EMITTER_INTERVAL_SECS",
                DEFAULT_EMITTER_INTERVAL_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                "EMITTER_TIMEOUT_SECS",
                DEFAULT_EMITTER_TIMEOUT_SECS,
            )?),
            user_id: var_or("EMITTER_USER_ID", DEFAULT_SEED_USER),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Invalid(
                "Emitter interval must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "Emitter request timeout must be greater than 0".to_string(),
            ));
        }
        reqwest::Url::parse(&self.target_url).map_err(|e| {
            ConfigError::Invalid(format!("Emitter target '{}' is not a valid URL: {}", self.target_url, e))
        })?;
        Ok(())
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_EMITTER_TARGET_URL.to_string(),
            interval: Duration::from_secs(DEFAULT_EMITTER_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_EMITTER_TIMEOUT_SECS),
            user_id: DEFAULT_SEED_USER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_listener_env() {
        std::env::set_var("LISTENER_PORT", "9100");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://dash.example.com");

        let config = ListenerConfig::from_env().unwrap();

        std::env::remove_var("LISTENER_PORT");
        std::env::remove_var("CORS_ALLOWED_ORIGINS");

        assert_eq!(config.port, 9100);
        assert_eq!(config.bind_address(), "0.0.0.0:9100");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:3000", "https://dash.example.com"]
        );
        assert!(!config.cors.allows_any_origin());
    }

    #[test]
    #[serial]
    fn test_listener_bad_port() {
        std::env::set_var("LISTENER_PORT", "eighty");
        let result = ListenerConfig::from_env();
        std::env::remove_var("LISTENER_PORT");
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_default_cors_allows_any() {
        assert!(ListenerConfig::default().cors.allows_any_origin());
    }

    #[test]
    fn test_emitter_validation() {
        let mut config = EmitterConfig::default();
        assert!(config.validate().is_ok());

        config.interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.interval = Duration::from_secs(1);
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.request_timeout = Duration::from_secs(1);
        config.target_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
