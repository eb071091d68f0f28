//! # Authentication
//!
//! Builds the `Authorization` header sent with every Balikobot call.
//! Accounts with an API user authenticate with Basic auth
//! (`user:api_key`); a bare API key is sent as a Bearer token.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Supported authentication methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    BearerToken {
        token: String,
    },
    BasicAuth {
        username: String,
        password: String,
    },
}

impl AuthMethod {
    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            AuthMethod::BearerToken { token } => format!("Bearer {token}"),
            AuthMethod::BasicAuth { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            AuthMethod::BearerToken { .. } => "bearer",
            AuthMethod::BasicAuth { .. } => "basic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_is_base64_encoded() {
        let auth = AuthMethod::BasicAuth {
            username: "user".into(),
            password: "key".into(),
        };
        assert_eq!(auth.header_value(), "Basic dXNlcjprZXk=");
        assert_eq!(auth.scheme(), "basic");
    }

    #[test]
    fn bearer_token_is_sent_verbatim() {
        let auth = AuthMethod::BearerToken {
            token: "abc123".into(),
        };
        assert_eq!(auth.header_value(), "Bearer abc123");
        assert_eq!(auth.scheme(), "bearer");
    }
}
