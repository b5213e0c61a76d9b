//! Error types for the Fadalax session crate
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for session bootstrap operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, discovery-document fetches, the silent-login
/// attempt, and the interactive implicit-flow kickoff.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// OIDC discovery document fetch or parse errors
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Silent-login errors (malformed redirect fragment, missing token)
    #[error("Login error: {0}")]
    Login(String),

    /// Token validation policy rejected the held token
    #[error("Token validation error: {0}")]
    TokenValidation(String),

    /// Implicit-flow initiation errors (bad endpoint URL, navigation failure)
    #[error("Implicit flow error: {0}")]
    ImplicitFlow(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parse errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for session operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
