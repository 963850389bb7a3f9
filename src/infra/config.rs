//! Centralized configuration (environment variables + defaults).

use thiserror::Error;

/// Port the backend listens on in development.
pub const DEV_BACKEND_PORT: u16 = 8080;
pub const DEV_SESSION_SECRET: &str = "some secret hurr";
pub const DEFAULT_SESSION_COOKIE: &str = "koa:sess";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Name of the session cookie.
    pub key: String,
}

/// Backend address and session settings for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the backend, without a trailing slash.
    pub serve: String,
    /// Secrets used to sign session cookies.
    pub keys: Vec<String>,
    pub session: SessionConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

impl AppConfig {
    /// Development settings: the backend runs on the page's host at port 8080.
    pub fn development(hostname: &str) -> Self {
        Self {
            serve: format!("http://{}:{}", hostname, DEV_BACKEND_PORT),
            keys: vec![DEV_SESSION_SECRET.to_string()],
            session: SessionConfig {
                key: DEFAULT_SESSION_COOKIE.to_string(),
            },
        }
    }

    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// - `RAP_ENV`: `development` (default) or `production`
    /// - `RAP_HOSTNAME`: development host, default `localhost`
    /// - `RAP_SERVE`: backend base URL; required in production
    /// - `RAP_SESSION_KEYS`: comma-separated signing secrets; required in production
    /// - `RAP_SESSION_COOKIE`: session cookie name, default `koa:sess`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let env = match get("RAP_ENV").as_deref() {
            None | Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") => Environment::Production,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "RAP_ENV",
                    value: other.to_string(),
                })
            }
        };

        let mut config = match env {
            Environment::Development => {
                let host = get("RAP_HOSTNAME").unwrap_or_else(|| "localhost".to_string());
                Self::development(&host)
            }
            Environment::Production => Self {
                serve: get("RAP_SERVE").ok_or(ConfigError::Missing("RAP_SERVE"))?,
                keys: Vec::new(),
                session: SessionConfig {
                    key: DEFAULT_SESSION_COOKIE.to_string(),
                },
            },
        };

        if let Some(serve) = get("RAP_SERVE") {
            config.serve = serve;
        }
        if !config.serve.starts_with("http://") && !config.serve.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "RAP_SERVE",
                value: config.serve,
            });
        }
        config.serve = config.serve.trim_end_matches('/').to_string();

        if let Some(keys) = get("RAP_SESSION_KEYS") {
            config.keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }
        if env == Environment::Production && config.keys.is_empty() {
            return Err(ConfigError::Missing("RAP_SESSION_KEYS"));
        }

        if let Some(cookie) = get("RAP_SESSION_COOKIE") {
            config.session.key = cookie;
        }

        Ok(config)
    }
}
