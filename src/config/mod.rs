//! # Configuration
//!
//! Process configuration is read once at startup into an [`ApiConfig`] and
//! passed to whatever needs it. Nothing below `main` looks at the
//! environment directly.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `BALIKOBOT_API_KEY` | yes | |
//! | `BALIKOBOT_API_USER` | no | Bearer auth when unset |
//! | `BALIKOBOT_PARTNER` | no | no `BB-Partner` header |
//! | `BALIKOBOT_BASE_URL` | no | `https://apiv2.balikobot.cz` |
//! | `BALIKOBOT_TIMEOUT_MS` | no | `30000` |

use std::path::{Path, PathBuf};

use crate::auth::AuthMethod;

pub const DEFAULT_BASE_URL: &str = "https://apiv2.balikobot.cz";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const API_KEY_VAR: &str = "BALIKOBOT_API_KEY";
const API_USER_VAR: &str = "BALIKOBOT_API_USER";
const PARTNER_VAR: &str = "BALIKOBOT_PARTNER";
const BASE_URL_VAR: &str = "BALIKOBOT_BASE_URL";
const TIMEOUT_VAR: &str = "BALIKOBOT_TIMEOUT_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_user: Option<String>,
    pub api_key: String,
    pub partner: Option<String>,
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let base_url = read(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: BASE_URL_VAR,
                reason: format!("`{base_url}` is not an http(s) URL"),
            });
        }

        let timeout_ms = match read(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_user: read(API_USER_VAR),
            api_key,
            partner: read(PARTNER_VAR),
            timeout_ms,
        })
    }

    pub fn auth(&self) -> AuthMethod {
        match &self.api_user {
            Some(username) => AuthMethod::BasicAuth {
                username: username.clone(),
                password: self.api_key.clone(),
            },
            None => AuthMethod::BearerToken {
                token: self.api_key.clone(),
            },
        }
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: TIMEOUT_VAR,
        reason,
    };
    let value: u64 = raw
        .parse()
        .map_err(|err| invalid(format!("`{raw}`: {err}")))?;
    if value == 0 {
        return Err(invalid("must be greater than 0".to_string()));
    }
    Ok(value)
}

/// Loads a dotenv file into the process environment. Without an explicit
/// path, `.env` is searched from the current directory upwards; a missing
/// default file is not an error.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|_| Some(path.to_path_buf())),
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(err) if err.not_found() => Ok(None),
            Err(err) => Err(err),
        },
    }
}
