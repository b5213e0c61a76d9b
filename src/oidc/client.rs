//! OAuth collaborator for the OIDC implicit flow
//!
//! This module defines the [`OAuthClient`] trait — the collaborator seam the
//! session bootstrapper drives — and [`ImplicitFlowClient`], the reqwest-based
//! implementation. The client owns the discovery state and the in-memory
//! token cache; callers only observe token validity through
//! [`OAuthClient::has_valid_id_token`].
//!
//! # Flow overview
//!
//! 1. `configure` applies the static [`SessionConfig`].
//! 2. `load_discovery_document_and_try_login` fetches the provider's
//!    discovery document, then consumes a pending redirect fragment (if one
//!    was captured) into the token cache — the silent-login attempt.
//! 3. `has_valid_id_token` reports whether a live identity token is held.
//! 4. `init_implicit_flow` builds the authorization URL with a random
//!    `state` and `nonce` and hands it to the navigation hook; the redirect
//!    transfers control to the identity provider.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use url::Url;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::oidc::discovery::{fetch_discovery_document, DiscoveryDocument};
use crate::oidc::token::{TokenCache, TokenSet};
use crate::oidc::validation::{NullValidationHandler, TokenValidationHandler};

// ---------------------------------------------------------------------------
// OAuthClient
// ---------------------------------------------------------------------------

/// The OAuth/OIDC collaborator surface consumed by the session bootstrapper.
///
/// Implementations own the token cache; the cache must not be assumed safe
/// for concurrent external mutation.
#[async_trait]
pub trait OAuthClient: Send {
    /// Applies the static session configuration.
    fn configure(&mut self, config: &SessionConfig);

    /// Installs the token-validation policy.
    ///
    /// The policy is consulted both when accepting login tokens and when
    /// reporting token validity through
    /// [`has_valid_id_token`](OAuthClient::has_valid_id_token).
    fn set_validation_handler(&mut self, handler: Box<dyn TokenValidationHandler>);

    /// Fetches the discovery document and attempts a silent login.
    ///
    /// This is the single suspension point of the bootstrap sequence.
    async fn load_discovery_document_and_try_login(&mut self) -> Result<()>;

    /// Returns `true` when a live identity token is currently held.
    fn has_valid_id_token(&self) -> bool;

    /// Initiates the interactive implicit-flow redirect.
    ///
    /// The call returns after initiating navigation; in a browser context the
    /// redirect ends the page lifecycle, so callers must not expect to make
    /// further progress in the authenticated path afterwards.
    fn init_implicit_flow(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// NavigationHook
// ---------------------------------------------------------------------------

/// Receives the authorization URL when the implicit flow is initiated.
///
/// The default [`BrowserNavigator`] prints the URL and makes a best-effort
/// attempt to open it in the system browser. Tests install a recording hook.
pub trait NavigationHook: Send {
    /// Navigates to the authorization URL.
    fn navigate(&mut self, url: &Url) -> Result<()>;
}

/// Prints the authorization URL to stderr and tries to open the browser.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl NavigationHook for BrowserNavigator {
    fn navigate(&mut self, url: &Url) -> Result<()> {
        eprintln!("Open the following URL in your browser to sign in:\n{url}");
        try_open_browser(url.as_str());
        Ok(())
    }
}

/// Attempts to open the URL in the user's default browser.
///
/// Errors are intentionally ignored; if the browser does not open the user
/// can copy the URL from stderr.
fn try_open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    {
        let _ = std::process::Command::new("open").arg(url).spawn();
    }
    #[cfg(target_os = "linux")]
    {
        let _ = std::process::Command::new("xdg-open").arg(url).spawn();
    }
    #[cfg(target_os = "windows")]
    {
        let _ = std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn();
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = url;
    }
}

// ---------------------------------------------------------------------------
// ImplicitFlowClient
// ---------------------------------------------------------------------------

/// Reqwest-based [`OAuthClient`] implementing the OIDC implicit flow.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use fadalax_session::config::SessionConfig;
/// use fadalax_session::oidc::{ImplicitFlowClient, OAuthClient};
///
/// # async fn example() -> fadalax_session::error::Result<()> {
/// let mut client = ImplicitFlowClient::new(Arc::new(reqwest::Client::new()));
/// client.configure(&SessionConfig::default());
/// client.load_discovery_document_and_try_login().await?;
/// if !client.has_valid_id_token() {
///     client.init_implicit_flow()?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct ImplicitFlowClient {
    http: Arc<reqwest::Client>,
    config: Option<SessionConfig>,
    validation_handler: Box<dyn TokenValidationHandler>,
    discovery: Option<DiscoveryDocument>,
    cache: TokenCache,
    pending_fragment: Option<String>,
    navigator: Box<dyn NavigationHook>,
}

impl ImplicitFlowClient {
    /// Creates an unconfigured client with the null validation policy and the
    /// browser navigation hook.
    pub fn new(http: Arc<reqwest::Client>) -> Self {
        Self {
            http,
            config: None,
            validation_handler: Box::new(NullValidationHandler),
            discovery: None,
            cache: TokenCache::new(),
            pending_fragment: None,
            navigator: Box::new(BrowserNavigator),
        }
    }

    /// Supplies a captured redirect fragment for the next silent-login
    /// attempt.
    ///
    /// A native client has no browser URL to read the fragment from, so the
    /// caller captures it (for example from a redirect-URI callback) and
    /// hands it over explicitly.
    pub fn with_login_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.pending_fragment = Some(fragment.into());
        self
    }

    /// Replaces the navigation hook invoked by
    /// [`init_implicit_flow`](OAuthClient::init_implicit_flow).
    pub fn with_navigation_hook(mut self, navigator: Box<dyn NavigationHook>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Returns the loaded discovery document, if discovery has run.
    pub fn discovery_document(&self) -> Option<&DiscoveryDocument> {
        self.discovery.as_ref()
    }

    fn require_config(&self) -> Result<&SessionConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| SessionError::Config("client is not configured".to_string()).into())
    }

    /// Consumes the pending redirect fragment into the token cache.
    ///
    /// A rejected token is not cached and the rejection surfaces to the
    /// caller as an error, leaving the client re-runnable.
    fn try_login_from_fragment(&mut self) -> Result<()> {
        let Some(fragment) = self.pending_fragment.take() else {
            tracing::debug!("no pending redirect fragment, silent login skipped");
            return Ok(());
        };

        let tokens = TokenSet::from_fragment(&fragment)?;
        if !self.validation_handler.validate(&tokens) {
            return Err(SessionError::TokenValidation(
                "validation handler rejected the redirect tokens".to_string(),
            )
            .into());
        }

        tracing::info!("silent login succeeded, identity token cached");
        self.cache.store(tokens);
        Ok(())
    }
}

#[async_trait]
impl OAuthClient for ImplicitFlowClient {
    fn configure(&mut self, config: &SessionConfig) {
        self.config = Some(config.clone());
    }

    fn set_validation_handler(&mut self, handler: Box<dyn TokenValidationHandler>) {
        self.validation_handler = handler;
    }

    async fn load_discovery_document_and_try_login(&mut self) -> Result<()> {
        let issuer = Url::parse(&self.require_config()?.issuer)?;

        let doc = fetch_discovery_document(&self.http, &issuer).await?;
        tracing::debug!(authorization_endpoint = %doc.authorization_endpoint, "discovery document loaded");
        self.discovery = Some(doc);

        self.try_login_from_fragment()
    }

    fn has_valid_id_token(&self) -> bool {
        match self.cache.current() {
            Some(tokens) => !tokens.is_expired() && self.validation_handler.validate(tokens),
            None => false,
        }
    }

    fn init_implicit_flow(&mut self) -> Result<()> {
        let config = self.require_config()?.clone();
        let discovery = self.discovery.as_ref().ok_or_else(|| {
            SessionError::ImplicitFlow("discovery document not loaded".to_string())
        })?;

        let auth_url = build_authorization_url(&config, discovery)?;
        tracing::info!(%auth_url, "initiating implicit-flow login redirect");
        self.navigator.navigate(&auth_url)
    }
}

// ---------------------------------------------------------------------------
// Authorization URL construction
// ---------------------------------------------------------------------------

/// Generates a cryptographically random `state`/`nonce` value.
///
/// 16 random bytes encoded as base64url without padding.
fn generate_nonce() -> String {
    use rand::RngCore as _;
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Builds the implicit-flow authorization URL from the session configuration
/// and the discovered authorization endpoint.
fn build_authorization_url(config: &SessionConfig, discovery: &DiscoveryDocument) -> Result<Url> {
    let mut url = Url::parse(&discovery.authorization_endpoint)
        .map_err(|e| SessionError::ImplicitFlow(format!("invalid authorization endpoint URL: {e}")))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("response_type", &config.response_type);
        query.append_pair("client_id", &config.client_id);
        query.append_pair("redirect_uri", &config.redirect_uri);
        query.append_pair("scope", &config.scope);
        query.append_pair("state", &generate_nonce());
        query.append_pair("nonce", &generate_nonce());
    }

    Ok(url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn discovery_doc() -> DiscoveryDocument {
        serde_json::from_value(serde_json::json!({
            "issuer": "https://idp.example.com",
            "authorization_endpoint": "https://idp.example.com/oauth2/auth",
            "token_endpoint": "https://idp.example.com/oauth2/token"
        }))
        .unwrap()
    }

    fn make_client() -> ImplicitFlowClient {
        ImplicitFlowClient::new(Arc::new(reqwest::Client::new()))
    }

    /// Records navigated URLs instead of opening a browser.
    #[derive(Default)]
    struct RecordingNavigator {
        urls: Arc<std::sync::Mutex<Vec<Url>>>,
    }

    impl NavigationHook for RecordingNavigator {
        fn navigate(&mut self, url: &Url) -> Result<()> {
            self.urls.lock().unwrap().push(url.clone());
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // generate_nonce
    // -----------------------------------------------------------------------

    #[test]
    fn test_generate_nonce_is_unpadded_base64url() {
        let nonce = generate_nonce();
        // 16 bytes -> 22 base64url characters, no padding.
        assert_eq!(nonce.len(), 22);
        assert!(!nonce.contains('='));
        assert!(!nonce.contains('+'));
        assert!(!nonce.contains('/'));
    }

    #[test]
    fn test_generate_nonce_values_differ() {
        assert_ne!(generate_nonce(), generate_nonce());
    }

    // -----------------------------------------------------------------------
    // build_authorization_url
    // -----------------------------------------------------------------------

    #[test]
    fn test_build_authorization_url_contains_required_parameters() {
        let url = build_authorization_url(&SessionConfig::default(), &discovery_doc()).unwrap();

        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.get("response_type").unwrap(), "id_token token");
        assert_eq!(pairs.get("client_id").unwrap(), "fadalax-frontend");
        assert_eq!(pairs.get("scope").unwrap(), "openid profile email");
        assert!(pairs.contains_key("redirect_uri"));
        assert!(pairs.contains_key("state"));
        assert!(pairs.contains_key("nonce"));
    }

    #[test]
    fn test_build_authorization_url_uses_discovered_endpoint() {
        let url = build_authorization_url(&SessionConfig::default(), &discovery_doc()).unwrap();
        assert_eq!(url.host_str(), Some("idp.example.com"));
        assert_eq!(url.path(), "/oauth2/auth");
    }

    #[test]
    fn test_build_authorization_url_rejects_bad_endpoint() {
        let mut doc = discovery_doc();
        doc.authorization_endpoint = "not a url".to_string();
        assert!(build_authorization_url(&SessionConfig::default(), &doc).is_err());
    }

    // -----------------------------------------------------------------------
    // has_valid_id_token
    // -----------------------------------------------------------------------

    #[test]
    fn test_has_valid_id_token_false_when_cache_empty() {
        assert!(!make_client().has_valid_id_token());
    }

    #[test]
    fn test_has_valid_id_token_true_after_fragment_login() {
        let mut client = make_client().with_login_fragment("#id_token=idtok&expires_in=3600");
        client.configure(&SessionConfig::default());
        client.try_login_from_fragment().unwrap();
        assert!(client.has_valid_id_token());
    }

    #[test]
    fn test_has_valid_id_token_consults_handler_installed_after_login() {
        struct RejectAll;
        impl TokenValidationHandler for RejectAll {
            fn validate(&self, _tokens: &TokenSet) -> bool {
                false
            }
        }

        let mut client = make_client().with_login_fragment("#id_token=idtok&expires_in=3600");
        client.configure(&SessionConfig::default());
        client.try_login_from_fragment().unwrap();
        assert!(client.has_valid_id_token());

        // Swapping in a rejecting policy must invalidate the cached token.
        client.set_validation_handler(Box::new(RejectAll));
        assert!(!client.has_valid_id_token());
    }

    #[test]
    fn test_has_valid_id_token_false_for_expired_fragment() {
        let mut client = make_client().with_login_fragment("#id_token=idtok&expires_in=0");
        client.configure(&SessionConfig::default());
        client.try_login_from_fragment().unwrap();
        assert!(!client.has_valid_id_token());
    }

    // -----------------------------------------------------------------------
    // try_login_from_fragment
    // -----------------------------------------------------------------------

    #[test]
    fn test_try_login_without_fragment_is_noop() {
        let mut client = make_client();
        client.configure(&SessionConfig::default());
        client.try_login_from_fragment().unwrap();
        assert!(!client.has_valid_id_token());
    }

    #[test]
    fn test_try_login_consumes_fragment_once() {
        let mut client = make_client().with_login_fragment("#id_token=idtok");
        client.configure(&SessionConfig::default());
        client.try_login_from_fragment().unwrap();
        assert!(client.pending_fragment.is_none());
    }

    #[test]
    fn test_try_login_rejected_by_validation_handler() {
        struct RejectAll;
        impl TokenValidationHandler for RejectAll {
            fn validate(&self, _tokens: &TokenSet) -> bool {
                false
            }
        }

        let mut client = make_client().with_login_fragment("#id_token=idtok");
        client.configure(&SessionConfig::default());
        client.set_validation_handler(Box::new(RejectAll));

        assert!(client.try_login_from_fragment().is_err());
        assert!(!client.has_valid_id_token());
    }

    // -----------------------------------------------------------------------
    // init_implicit_flow
    // -----------------------------------------------------------------------

    #[test]
    fn test_init_implicit_flow_requires_configuration() {
        let mut client = make_client();
        assert!(client.init_implicit_flow().is_err());
    }

    #[test]
    fn test_init_implicit_flow_requires_discovery() {
        let mut client = make_client();
        client.configure(&SessionConfig::default());
        let result = client.init_implicit_flow();
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("discovery"), "error should mention discovery: {msg}");
    }

    #[test]
    fn test_init_implicit_flow_navigates_to_authorization_endpoint() {
        let urls = Arc::new(std::sync::Mutex::new(Vec::new()));
        let navigator = RecordingNavigator { urls: Arc::clone(&urls) };

        let mut client = make_client().with_navigation_hook(Box::new(navigator));
        client.configure(&SessionConfig::default());
        client.discovery = Some(discovery_doc());

        client.init_implicit_flow().unwrap();

        let recorded = urls.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].path(), "/oauth2/auth");
    }

    // -----------------------------------------------------------------------
    // load_discovery_document_and_try_login
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_load_discovery_requires_configuration() {
        let mut client = make_client();
        let result = client.load_discovery_document_and_try_login().await;
        assert!(result.is_err());
    }

    // Wiremock integration tests are in tests/oidc_discovery_test.rs and
    // tests/bootstrap_flow_test.rs.
}
