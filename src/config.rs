//! Configuration module for the Twitter Gateway
//!
//! Everything is read from the environment exactly once at startup and
//! never mutated afterwards. Handlers receive the config through the
//! shared application state.

use std::sync::OnceLock;

use tracing::info;

/// Operating mode, controls error verbosity in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

// Process-wide environment, set once in main. The error serializer uses
// this to decide whether upstream detail is exposed.
static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Record the operating mode for the lifetime of the process.
pub fn init_environment(env: Environment) {
    let _ = ENVIRONMENT.set(env);
}

/// Current operating mode. Defaults to development when unset (tests).
pub fn current_environment() -> Environment {
    ENVIRONMENT.get().copied().unwrap_or(Environment::Development)
}

/// Immutable server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential for the upstream Twitter client. None disables the
    /// mutating endpoints and /trending.
    pub api_key: Option<String>,
    /// Static shared secret gating mutating routes.
    pub bearer_token: Option<String>,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Operating mode.
    pub environment: Environment,
    /// Base URL of the rettiwt-compatible upstream service.
    pub upstream_url: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let api_key = read_secret("TWITTER_API_KEY");
        let bearer_token = read_secret("BEARER_TOKEN");

        if api_key.is_some() {
            info!("TWITTER_API_KEY configured (key hidden)");
        }

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let upstream_url = std::env::var("TWITTER_API_URL")
            .unwrap_or_else(|_| "https://api.rettiwt.io/v1".to_string());

        Self {
            api_key,
            bearer_token,
            host,
            port,
            environment: Environment::from_env(),
            upstream_url,
        }
    }

    /// Human-readable auth mode for the banner endpoint.
    pub fn auth_mode(&self) -> &'static str {
        if self.api_key.is_some() {
            "User Authentication (Full Access)"
        } else {
            "Guest Authentication (Limited Access)"
        }
    }

    /// True when both credentials needed for full operation are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.bearer_token.is_some()
    }
}

/// Read a secret env var, treating empty and placeholder values as unset.
fn read_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty() && v != "API_KEY" && v != "your-secure-bearer-token-here")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_default() {
        assert_eq!(current_environment(), Environment::Development);
        assert!(!Environment::Development.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_auth_mode() {
        let mut config = AppConfig {
            api_key: None,
            bearer_token: None,
            host: "0.0.0.0".into(),
            port: 3000,
            environment: Environment::Development,
            upstream_url: "http://localhost:9000".into(),
        };
        assert_eq!(config.auth_mode(), "Guest Authentication (Limited Access)");
        assert!(!config.is_configured());

        config.api_key = Some("key".into());
        config.bearer_token = Some("token".into());
        assert_eq!(config.auth_mode(), "User Authentication (Full Access)");
        assert!(config.is_configured());
    }
}
