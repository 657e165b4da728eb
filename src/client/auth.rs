use serde::Deserialize;

use crate::transport::{basic_auth, custom_auth};

const SANDBOX_BASE_URL: &str = "https://api.infobip.com";
const LIVE_BASE_URL: &str = "https://api.infobip.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Infobip deployment to talk to. Both currently resolve to the same host.
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    pub fn from_production_flag(is_production: bool) -> Self {
        if is_production { Self::Live } else { Self::Sandbox }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Live => LIVE_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// `Authorization: App <api key>`.
    #[default]
    Custom,
    /// `Authorization: Basic <base64(username:password)>`.
    Basic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Authentication settings, deserializable from a config file.
///
/// ```json
/// { "authType": "basic", "username": "user", "password": "secret" }
/// ```
pub struct AuthConfig {
    pub auth_type: AuthType,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Credentials for Infobip API calls.
pub enum Auth {
    /// Authenticate with an API key (`App` scheme).
    ApiKey(String),
    /// Authenticate with HTTP Basic credentials.
    Basic { username: String, password: String },
}

impl Auth {
    pub fn api_key(value: impl Into<String>) -> Self {
        Self::ApiKey(value.into())
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Pick the scheme from `config`; `api_key` is used unless Basic is requested.
    ///
    /// Missing Basic credentials are sent as empty strings.
    pub fn from_config(api_key: impl Into<String>, config: &AuthConfig) -> Self {
        match config.auth_type {
            AuthType::Basic => Self::basic(
                config.username.clone().unwrap_or_default(),
                config.password.clone().unwrap_or_default(),
            ),
            AuthType::Custom => Self::api_key(api_key),
        }
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Self::ApiKey(api_key) => custom_auth(api_key),
            Self::Basic { username, password } => basic_auth(username, password),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_defaults_to_api_key() {
        let auth = Auth::from_config("key", &AuthConfig::default());
        assert_eq!(auth, Auth::api_key("key"));
        assert_eq!(auth.header_value(), "App key");
    }

    #[test]
    fn from_config_selects_basic() {
        let config = AuthConfig {
            auth_type: AuthType::Basic,
            username: Some("user".to_owned()),
            password: Some("pass".to_owned()),
        };
        let auth = Auth::from_config("ignored", &config);
        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn auth_config_deserializes_camel_case() {
        let config: AuthConfig =
            serde_json::from_str(r#"{"authType":"basic","username":"u","password":"p"}"#)
                .unwrap();
        assert_eq!(config.auth_type, AuthType::Basic);
        assert_eq!(config.username.as_deref(), Some("u"));

        let config: AuthConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AuthConfig::default());
    }

    #[test]
    fn environments_share_one_host() {
        assert_eq!(
            Environment::from_production_flag(true).base_url(),
            Environment::from_production_flag(false).base_url()
        );
        assert_eq!(Environment::default(), Environment::Sandbox);
    }
}
