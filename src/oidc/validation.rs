//! Pluggable token-validation policies
//!
//! The OAuth collaborator consults a validation handler before treating a
//! held token set as a live session. The bootstrapper installs the
//! null-object variant, which skips signature verification entirely and
//! trusts the transport layer; deployments that want local checks can plug
//! in a stricter handler.

use crate::oidc::token::TokenSet;

/// A token-validation policy consulted by [`has_valid_id_token`].
///
/// [`has_valid_id_token`]: crate::oidc::client::OAuthClient::has_valid_id_token
pub trait TokenValidationHandler: Send + Sync {
    /// Returns `true` when the held token set should be accepted.
    fn validate(&self, tokens: &TokenSet) -> bool;
}

/// Accepts any token without cryptographic verification.
///
/// This is the null-object validation policy: signature checks are
/// delegated to the transport layer and the identity provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullValidationHandler;

impl TokenValidationHandler for NullValidationHandler {
    fn validate(&self, _tokens: &TokenSet) -> bool {
        true
    }
}

/// Rejects token sets whose expiry has passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpiryValidationHandler;

impl TokenValidationHandler for ExpiryValidationHandler {
    fn validate(&self, tokens: &TokenSet) -> bool {
        !tokens.is_expired()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
