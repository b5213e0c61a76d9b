//! Fadalax session - OIDC implicit-flow session bootstrap library
//!
//! This library provides the startup authentication sequence of the Fadalax
//! frontend: configure an OAuth client, fetch the identity provider's
//! discovery document, attempt a silent login, and fall back to an
//! interactive implicit-flow redirect when no valid identity token is held.
//!
//! # Architecture
//!
//! - `bootstrap`: the session bootstrapper driving the collaborator
//! - `oidc`: the OAuth/OIDC collaborator (discovery, tokens, validation)
//! - `users`: the user-data access facade (stubbed endpoints)
//! - `config`: static session configuration
//! - `error`: error types and result alias
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fadalax_session::{ImplicitFlowClient, SessionBootstrapper, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SessionConfig::load("config/session.yaml")?;
//!     config.validate()?;
//!
//!     let client = ImplicitFlowClient::new(Arc::new(reqwest::Client::new()));
//!     let mut bootstrapper = SessionBootstrapper::new(client, config);
//!     let outcome = bootstrapper.configure().await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod oidc;
pub mod users;

// Re-export commonly used types
pub use bootstrap::{BootstrapOutcome, BootstrapState, SessionBootstrapper};
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use oidc::{ImplicitFlowClient, NullValidationHandler, OAuthClient, TokenSet};
pub use users::{User, UserService};
