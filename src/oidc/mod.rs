//! Client-side OpenID Connect support
//!
//! This module groups the OAuth/OIDC collaborator surface the session
//! bootstrapper drives:
//!
//! - `discovery`: OpenID Connect Discovery 1.0 document fetch
//! - `token`: identity/access token state and the in-memory token cache
//! - `validation`: pluggable token-validation policies
//! - `client`: the [`OAuthClient`](client::OAuthClient) collaborator trait
//!   and its reqwest-based implicit-flow implementation

pub mod client;
pub mod discovery;
pub mod token;
pub mod validation;

pub use client::{BrowserNavigator, ImplicitFlowClient, NavigationHook, OAuthClient};
pub use discovery::DiscoveryDocument;
pub use token::TokenSet;
pub use validation::{ExpiryValidationHandler, NullValidationHandler, TokenValidationHandler};
