//! Identity token state for the implicit flow
//!
//! The implicit flow returns tokens directly in the redirect fragment,
//! without a server-side code exchange. This module models the returned
//! token set, its expiry, and the in-memory cache the OAuth collaborator
//! owns. Nothing here is persisted; the cache lives and dies with the
//! process, matching the page lifecycle of the original session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

// ---------------------------------------------------------------------------
// TokenSet
// ---------------------------------------------------------------------------

/// The tokens returned by an implicit-flow redirect.
///
/// The `expires_at` field is a computed UTC timestamp derived from the
/// `expires_in` seconds in the fragment, so expiry can be determined without
/// a provider round trip.
///
/// # Examples
///
/// ```
/// use fadalax_session::oidc::TokenSet;
///
/// let set = TokenSet::from_fragment(
///     "#id_token=abc&access_token=def&token_type=bearer&expires_in=3600",
/// ).unwrap();
/// assert_eq!(set.id_token, "abc");
/// assert!(!set.is_expired());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// The identity token issued by the provider.
    pub id_token: String,

    /// The access token, when `response_type` requested one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// The token type, typically `"bearer"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// UTC timestamp at which the token set expires.
    ///
    /// When `None`, the tokens are treated as non-expiring.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub expires_at: Option<DateTime<Utc>>,

    /// Space-separated scopes granted by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// The `state` value echoed back by the provider, used to correlate the
    /// redirect with the request that initiated it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl TokenSet {
    /// Parses an implicit-flow redirect fragment into a token set.
    ///
    /// Accepts the fragment with or without its leading `#`. Keys other than
    /// the recognised OAuth response parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Login`] when no `id_token` parameter is
    /// present, which is what the provider returns on a denied or failed
    /// authorization.
    pub fn from_fragment(fragment: &str) -> Result<Self> {
        let raw = fragment.trim_start_matches('#');

        let mut id_token = None;
        let mut access_token = None;
        let mut token_type = None;
        let mut expires_in: Option<u64> = None;
        let mut scope = None;
        let mut state = None;

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "id_token" => id_token = Some(value.into_owned()),
                "access_token" => access_token = Some(value.into_owned()),
                "token_type" => token_type = Some(value.into_owned()),
                "expires_in" => expires_in = value.parse().ok(),
                "scope" => scope = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }

        let id_token = id_token
            .ok_or_else(|| SessionError::Login("redirect fragment has no id_token".to_string()))?;

        let expires_at = expires_in.map(|secs| {
            Utc::now() + chrono::Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
        });

        Ok(Self {
            id_token,
            access_token,
            token_type,
            expires_at,
            scope,
            state,
        })
    }

    /// Returns `true` when the token set is expired or about to expire.
    ///
    /// A 60-second buffer is applied so that callers can re-authenticate
    /// before the provider starts rejecting the token. Token sets with no
    /// `expires_at` value are considered perpetually valid.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            None => false,
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(60);
                Utc::now() >= expires_at - buffer
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TokenCache
// ---------------------------------------------------------------------------

/// In-memory token cache owned by the OAuth collaborator.
///
/// Callers outside the collaborator only observe the cache through
/// `has_valid_id_token`; they never mutate it directly.
#[derive(Debug, Default)]
pub struct TokenCache {
    current: Option<TokenSet>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a token set, replacing any previously held one.
    pub fn store(&mut self, tokens: TokenSet) {
        self.current = Some(tokens);
    }

    /// Returns the currently held token set, if any.
    pub fn current(&self) -> Option<&TokenSet> {
        self.current.as_ref()
    }

    /// Clears the held token set.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
