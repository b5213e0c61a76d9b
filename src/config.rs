//! Configuration management for the Fadalax session crate
//!
//! This module handles loading, parsing, and validating the static session
//! configuration from a YAML file with environment-variable overrides.
//! The configuration is immutable after load; the bootstrapper applies it
//! to the OAuth collaborator verbatim.

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static session configuration describing the identity provider and client
///
/// Holds the identity-provider issuer, the registered client identifier,
/// the redirect URI the provider sends the implicit-flow fragment back to,
/// the requested scopes, and the base URL of the user-record API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// OpenID Connect issuer base URL
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// OAuth client identifier registered at the identity provider
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Redirect URI receiving the implicit-flow response fragment
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Space-separated OAuth scopes to request
    #[serde(default = "default_scope")]
    pub scope: String,

    /// OAuth response type; the implicit flow returns tokens in the fragment
    #[serde(default = "default_response_type")]
    pub response_type: String,

    /// Base URL of the user-record API (endpoints are not live yet)
    #[serde(default)]
    pub api_base: String,
}

fn default_issuer() -> String {
    "https://hydra.fadalax.tech:9000".to_string()
}

fn default_client_id() -> String {
    "fadalax-frontend".to_string()
}

fn default_redirect_uri() -> String {
    "https://asl.fadalax.tech/".to_string()
}

fn default_scope() -> String {
    "openid profile email".to_string()
}

fn default_response_type() -> String {
    "id_token token".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            client_id: default_client_id(),
            redirect_uri: default_redirect_uri(),
            scope: default_scope(),
            response_type: default_response_type(),
            api_base: String::new(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// After parsing, environment overrides are applied:
    /// `FADALAX_ISSUER`, `FADALAX_CLIENT_ID`, and `FADALAX_REDIRECT_URI`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file exists but cannot be read,
    /// or [`SessionError::Yaml`] if its contents are not valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(SessionError::Io)?;
            serde_yaml::from_str(&contents).map_err(SessionError::Yaml)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Applies environment-variable overrides on top of the parsed values.
    fn apply_env_overrides(&mut self) {
        if let Ok(issuer) = std::env::var("FADALAX_ISSUER") {
            self.issuer = issuer;
        }
        if let Ok(client_id) = std::env::var("FADALAX_CLIENT_ID") {
            self.client_id = client_id;
        }
        if let Ok(redirect_uri) = std::env::var("FADALAX_REDIRECT_URI") {
            self.redirect_uri = redirect_uri;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] when the client id or scope is empty,
    /// or when the issuer or redirect URI is not an absolute HTTP(S) URL.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(SessionError::Config("client_id must not be empty".to_string()).into());
        }
        if self.scope.trim().is_empty() {
            return Err(SessionError::Config("scope must not be empty".to_string()).into());
        }

        for (name, value) in [("issuer", &self.issuer), ("redirect_uri", &self.redirect_uri)] {
            let url = url::Url::parse(value).map_err(|e| {
                SessionError::Config(format!("{name} is not a valid URL: {e}"))
            })?;
            if url.scheme() != "https" && url.scheme() != "http" {
                return Err(SessionError::Config(format!(
                    "{name} must use http or https, got {}",
                    url.scheme()
                ))
                .into());
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
