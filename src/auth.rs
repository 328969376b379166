//! Authentication
//!
//! GitHub accepts personal access tokens, installation tokens and OAuth
//! tokens as bearer credentials, and basic credentials for a few legacy
//! flows.

use reqwest::RequestBuilder;
use std::fmt;

/// Credentials attached to every request
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// Anonymous access (60 requests per hour on github.com)
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password or token
        password: String,
    },
}

impl AuthConfig {
    /// Bearer credentials from a token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Basic credentials
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check if any credentials are configured
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Attach the credentials to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            AuthConfig::None => req,
            AuthConfig::Bearer { token } => req.bearer_auth(token),
            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let bearer = format!("{:?}", AuthConfig::bearer("ghp_secret"));
        assert!(!bearer.contains("ghp_secret"));
        assert!(bearer.contains("***"));

        let basic = format!("{:?}", AuthConfig::basic("octocat", "hunter2"));
        assert!(basic.contains("octocat"));
        assert!(!basic.contains("hunter2"));
    }

    #[test]
    fn test_is_authenticated() {
        assert!(!AuthConfig::None.is_authenticated());
        assert!(AuthConfig::bearer("t").is_authenticated());
        assert!(AuthConfig::basic("u", "p").is_authenticated());
    }

    #[test]
    fn test_apply_sets_authorization_header() {
        let client = reqwest::Client::new();

        let req = AuthConfig::bearer("abc")
            .apply(client.get("https://api.github.com/user"))
            .build()
            .unwrap();
        assert_eq!(req.headers()["authorization"], "Bearer abc");

        let req = AuthConfig::None
            .apply(client.get("https://api.github.com/user"))
            .build()
            .unwrap();
        assert!(req.headers().get("authorization").is_none());
    }
}
