//! Session bootstrap sequence
//!
//! On application start the [`SessionBootstrapper`] configures the OAuth
//! collaborator, attempts a silent re-authentication via the discovery
//! document fetch, and — when no valid identity token is already present —
//! initiates the interactive implicit-flow login redirect.
//!
//! The collaborator is constructor-injected behind the
//! [`OAuthClient`] trait; there is no hidden global registry.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::oidc::client::OAuthClient;
use crate::oidc::validation::NullValidationHandler;

// ---------------------------------------------------------------------------
// States and outcomes
// ---------------------------------------------------------------------------

/// Lifecycle state of the bootstrap sequence.
///
/// `RedirectingToLogin` has no terminal cleanup state; in a browser context
/// the redirect ends the process lifetime via navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// No configuration applied yet.
    Unconfigured,
    /// Configuration applied, discovery round trip in flight.
    AwaitingDiscovery,
    /// A valid identity token is held; the session exists.
    Authenticated,
    /// Interactive login redirect initiated.
    RedirectingToLogin,
}

/// The result of a completed bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A valid identity token was already held; no login was triggered.
    Authenticated,
    /// The interactive implicit-flow redirect was initiated.
    RedirectingToLogin,
}

// ---------------------------------------------------------------------------
// SessionBootstrapper
// ---------------------------------------------------------------------------

/// Drives the startup authentication sequence against an injected OAuth
/// collaborator.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use fadalax_session::bootstrap::{BootstrapOutcome, SessionBootstrapper};
/// use fadalax_session::config::SessionConfig;
/// use fadalax_session::oidc::ImplicitFlowClient;
///
/// # async fn example() -> fadalax_session::error::Result<()> {
/// let client = ImplicitFlowClient::new(Arc::new(reqwest::Client::new()));
/// let mut bootstrapper = SessionBootstrapper::new(client, SessionConfig::default());
///
/// match bootstrapper.configure().await? {
///     BootstrapOutcome::Authenticated => println!("session exists"),
///     BootstrapOutcome::RedirectingToLogin => println!("login redirect initiated"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionBootstrapper<C: OAuthClient> {
    oauth: C,
    config: SessionConfig,
    state: BootstrapState,
}

impl<C: OAuthClient> SessionBootstrapper<C> {
    /// Creates a bootstrapper owning the collaborator and the static session
    /// configuration.
    pub fn new(oauth: C, config: SessionConfig) -> Self {
        Self {
            oauth,
            config,
            state: BootstrapState::Unconfigured,
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Runs the bootstrap sequence.
    ///
    /// 1. Applies the static configuration to the OAuth collaborator.
    /// 2. Installs the [`NullValidationHandler`] token-validation policy
    ///    (signature checks are trusted to the transport layer).
    /// 3. Awaits the discovery-document load and silent-login attempt.
    /// 4. When a valid identity token is held, returns
    ///    [`BootstrapOutcome::Authenticated`] without touching the implicit
    ///    flow; otherwise calls
    ///    [`init_implicit_flow`](OAuthClient::init_implicit_flow) exactly once
    ///    and returns [`BootstrapOutcome::RedirectingToLogin`].
    ///
    /// Re-running `configure` with the same configuration yields the same
    /// outcome; configuration application is idempotent.
    ///
    /// # Errors
    ///
    /// A rejected discovery/login round trip is logged and surfaced to the
    /// caller. The bootstrapper returns to a re-runnable state, so the caller
    /// owns any retry policy.
    pub async fn configure(&mut self) -> Result<BootstrapOutcome> {
        self.oauth.configure(&self.config);
        self.oauth
            .set_validation_handler(Box::new(NullValidationHandler));
        self.state = BootstrapState::AwaitingDiscovery;

        if let Err(e) = self.oauth.load_discovery_document_and_try_login().await {
            tracing::warn!(error = %e, "discovery/login round trip failed");
            self.state = BootstrapState::Unconfigured;
            return Err(e);
        }

        if self.oauth.has_valid_id_token() {
            tracing::info!("valid identity token held, session authenticated");
            self.state = BootstrapState::Authenticated;
            return Ok(BootstrapOutcome::Authenticated);
        }

        tracing::info!("no valid identity token, initiating interactive login");
        if let Err(e) = self.oauth.init_implicit_flow() {
            tracing::warn!(error = %e, "login redirect initiation failed");
            self.state = BootstrapState::Unconfigured;
            return Err(e);
        }
        self.state = BootstrapState::RedirectingToLogin;
        Ok(BootstrapOutcome::RedirectingToLogin)
    }

    /// Consumes the bootstrapper and returns the collaborator.
    pub fn into_oauth_client(self) -> C {
        self.oauth
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
