//! Command-line interface definition
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the login bootstrap, the user facade, and
//! configuration inspection.

use clap::{Parser, Subcommand};

/// Fadalax session - OIDC implicit-flow session bootstrap
///
/// Configure the OAuth client against the identity provider, attempt a
/// silent re-authentication, and fall back to an interactive login redirect.
#[derive(Parser, Debug, Clone)]
#[command(name = "fadalax-session")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/session.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the session bootstrap sequence
    Login {
        /// Redirect fragment captured from a previous login redirect,
        /// consumed by the silent-login attempt
        #[arg(long, env = "FADALAX_LOGIN_FRAGMENT")]
        fragment: Option<String>,
    },

    /// Show the user record for an identifier
    Whoami {
        /// User identifier to look up
        #[arg(default_value = "u1")]
        uid: String,
    },

    /// Show the effective session configuration
    Config,
}

impl Cli {
    /// Parses command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
