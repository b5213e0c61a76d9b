//! OpenID Connect discovery
//!
//! This module fetches the identity provider's discovery document before
//! login. The document is JSON metadata describing the provider's endpoints
//! and capabilities, served at the OIDC Discovery 1.0 well-known URI:
//!
//! ```text
//! <issuer>/.well-known/openid-configuration
//! ```
//!
//! # References
//!
//! - OpenID Connect Discovery 1.0 <https://openid.net/specs/openid-connect-discovery-1_0.html>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SessionError};

// ---------------------------------------------------------------------------
// DiscoveryDocument
// ---------------------------------------------------------------------------

/// Metadata document describing an OpenID Connect identity provider.
///
/// # Examples
///
/// ```
/// use fadalax_session::oidc::DiscoveryDocument;
///
/// let json = r#"{
///     "issuer": "https://hydra.fadalax.tech:9000",
///     "authorization_endpoint": "https://hydra.fadalax.tech:9000/oauth2/auth",
///     "token_endpoint": "https://hydra.fadalax.tech:9000/oauth2/token",
///     "jwks_uri": "https://hydra.fadalax.tech:9000/.well-known/jwks.json"
/// }"#;
///
/// let doc: DiscoveryDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.issuer, "https://hydra.fadalax.tech:9000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DiscoveryDocument {
    /// The issuer identifier URI for this provider.
    pub issuer: String,

    /// The URL of the authorization endpoint the implicit flow redirects to.
    pub authorization_endpoint: String,

    /// The URL of the token endpoint (unused by the implicit flow but always
    /// advertised by the provider).
    pub token_endpoint: String,

    /// The URL of the provider's JSON Web Key Set document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<String>,

    /// Optional URL of the UserInfo endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userinfo_endpoint: Option<String>,

    /// OAuth scopes the provider supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes_supported: Option<Vec<String>>,

    /// `response_type` values the provider supports (e.g. `["id_token token"]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_types_supported: Option<Vec<String>>,

    /// Additional provider metadata fields not explicitly modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Discovery fetch
// ---------------------------------------------------------------------------

/// Builds the well-known discovery URL for an issuer.
///
/// The well-known segment is appended to the issuer path, tolerating a
/// trailing slash on the issuer.
fn build_discovery_url(issuer: &Url) -> Url {
    let mut url = issuer.clone();
    let path = issuer.path().trim_end_matches('/');
    url.set_path(&format!("{path}/.well-known/openid-configuration"));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Fetches the identity provider's discovery document.
///
/// # Arguments
///
/// * `http` - Shared [`reqwest::Client`] used to issue the request.
/// * `issuer` - The OpenID Connect issuer base URL.
///
/// # Returns
///
/// A deserialized [`DiscoveryDocument`] on success.
///
/// # Errors
///
/// Returns [`SessionError::Discovery`] if the HTTP request fails, the
/// endpoint responds with a non-success status, or the body cannot be parsed.
///
/// # Examples
///
/// ```no_run
/// use url::Url;
/// use fadalax_session::oidc::discovery::fetch_discovery_document;
///
/// # async fn example() -> fadalax_session::error::Result<()> {
/// let http = reqwest::Client::new();
/// let issuer = Url::parse("https://hydra.fadalax.tech:9000")?;
/// let doc = fetch_discovery_document(&http, &issuer).await?;
/// println!("authorize at: {}", doc.authorization_endpoint);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_discovery_document(
    http: &reqwest::Client,
    issuer: &Url,
) -> Result<DiscoveryDocument> {
    let well_known_url = build_discovery_url(issuer);

    let resp = http
        .get(well_known_url.clone())
        .send()
        .await
        .map_err(|e| SessionError::Discovery(format!("discovery fetch failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(SessionError::Discovery(format!(
            "discovery endpoint returned {}: {}",
            resp.status(),
            well_known_url
        ))
        .into());
    }

    let doc: DiscoveryDocument = resp
        .json()
        .await
        .map_err(|e| SessionError::Discovery(format!("failed to parse discovery document: {e}")))?;

    Ok(doc)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // build_discovery_url
    // -----------------------------------------------------------------------

    #[test]
    fn test_build_discovery_url_root_issuer() {
        let issuer = Url::parse("https://hydra.fadalax.tech:9000").unwrap();
        let url = build_discovery_url(&issuer);
        assert_eq!(
            url.as_str(),
            "https://hydra.fadalax.tech:9000/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_build_discovery_url_tolerates_trailing_slash() {
        let issuer = Url::parse("https://hydra.fadalax.tech:9000/").unwrap();
        let url = build_discovery_url(&issuer);
        assert_eq!(
            url.as_str(),
            "https://hydra.fadalax.tech:9000/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_build_discovery_url_preserves_issuer_path() {
        let issuer = Url::parse("https://idp.example.com/tenant/v2").unwrap();
        let url = build_discovery_url(&issuer);
        assert_eq!(
            url.as_str(),
            "https://idp.example.com/tenant/v2/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_build_discovery_url_strips_query_and_fragment() {
        let issuer = Url::parse("https://idp.example.com/base?x=1#frag").unwrap();
        let url = build_discovery_url(&issuer);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    // -----------------------------------------------------------------------
    // Serde
    // -----------------------------------------------------------------------

    #[test]
    fn test_discovery_document_deserializes_minimal() {
        let json = r#"{
            "issuer": "https://idp.example.com",
            "authorization_endpoint": "https://idp.example.com/oauth2/auth",
            "token_endpoint": "https://idp.example.com/oauth2/token"
        }"#;

        let doc: DiscoveryDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.issuer, "https://idp.example.com");
        assert!(doc.jwks_uri.is_none());
        assert!(doc.scopes_supported.is_none());
    }

    #[test]
    fn test_discovery_document_deserializes_full() {
        let json = r#"{
            "issuer": "https://idp.example.com",
            "authorization_endpoint": "https://idp.example.com/oauth2/auth",
            "token_endpoint": "https://idp.example.com/oauth2/token",
            "jwks_uri": "https://idp.example.com/.well-known/jwks.json",
            "userinfo_endpoint": "https://idp.example.com/userinfo",
            "scopes_supported": ["openid", "profile", "email"],
            "response_types_supported": ["id_token token", "code"]
        }"#;

        let doc: DiscoveryDocument = serde_json::from_str(json).unwrap();
        assert_eq!(
            doc.jwks_uri,
            Some("https://idp.example.com/.well-known/jwks.json".to_string())
        );
        assert_eq!(
            doc.scopes_supported,
            Some(vec![
                "openid".to_string(),
                "profile".to_string(),
                "email".to_string()
            ])
        );
    }

    #[test]
    fn test_discovery_document_captures_extra_fields() {
        let json = r#"{
            "issuer": "https://idp.example.com",
            "authorization_endpoint": "https://idp.example.com/oauth2/auth",
            "token_endpoint": "https://idp.example.com/oauth2/token",
            "end_session_endpoint": "https://idp.example.com/oauth2/sessions/logout"
        }"#;

        let doc: DiscoveryDocument = serde_json::from_str(json).unwrap();
        assert!(doc.extra.contains_key("end_session_endpoint"));
    }

    // Wiremock integration tests are in tests/oidc_discovery_test.rs
}
