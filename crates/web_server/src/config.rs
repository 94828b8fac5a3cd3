//! Server configuration read from the process environment.

use actix_web::http::Uri;
use thiserror::Error;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;
const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 10;
const MAX_BCRYPT_COST: u32 = 31;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5500,http://localhost:3000,https://happyevtaxi.com";

/// Configuration errors, reported once at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Reads the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_seconds = match get("TOKEN_TTL_SECONDS") {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(seconds) if seconds > 0 => seconds,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TOKEN_TTL_SECONDS",
                        value,
                        reason: "expected a positive number of seconds",
                    });
                }
            },
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(cost) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "BCRYPT_COST",
                        value,
                        reason: "expected an integer in 10..=31",
                    });
                }
            },
            None => DEFAULT_BCRYPT_COST,
        };

        let port = match get("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: value.clone(),
                reason: "expected a TCP port",
            })?,
            None => DEFAULT_PORT,
        };

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl: chrono::Duration::seconds(token_ttl_seconds),
            bcrypt_cost,
            host,
            port,
            cors_allowed_origins,
        })
    }

    /// Address the HTTP server binds to.
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Accepts `scheme://host[:port]` origins. A wildcard is refused because
/// credentialed CORS needs explicit origins.
fn parse_origin(origin: &str) -> Result<String, ConfigError> {
    let invalid = |reason| ConfigError::Invalid {
        key: "CORS_ALLOWED_ORIGINS",
        value: origin.to_string(),
        reason,
    };

    if origin == "*" {
        return Err(invalid("wildcard origins are not allowed"));
    }

    let uri = origin
        .parse::<Uri>()
        .map_err(|_| invalid("expected an origin such as https://example.com"))?;
    if uri.scheme().is_none() || uri.host().is_none() {
        return Err(invalid("expected an origin such as https://example.com"));
    }

    Ok(origin.to_string())
}
