use std::path::PathBuf;

use thiserror::Error;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
    "secret",
];

/// Longest accepted token lifetime: one year.
const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Origins of the local front-end dev servers.
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:5175",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:5175",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PAINKILLER_JWT_SECRET is unset or still a placeholder")]
    InsecureSecret,

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin may call the API.
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub token_ttl_minutes: i64,
    pub max_list_limit: u32,
    pub cors_origins: CorsOrigins,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("PAINKILLER_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            return Err(ConfigError::InsecureSecret);
        }

        let token_ttl_minutes: i64 = parse_or(&lookup, "PAINKILLER_TOKEN_TTL_MINUTES", 30)?;
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&token_ttl_minutes) {
            return Err(ConfigError::Invalid {
                var: "PAINKILLER_TOKEN_TTL_MINUTES",
                value: token_ttl_minutes.to_string(),
            });
        }

        let cors_origins = match lookup("PAINKILLER_CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => CorsOrigins::List(DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()),
        };

        Ok(Self {
            jwt_secret,
            db_path: lookup("PAINKILLER_DB_PATH")
                .unwrap_or_else(|| "painkiller.db".into())
                .into(),
            host: lookup("PAINKILLER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PAINKILLER_PORT", 8001)?,
            token_ttl_minutes,
            max_list_limit: parse_or(&lookup, "PAINKILLER_MAX_LIST_LIMIT", 500)?,
            cors_origins,
        })
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
