//! Fadalax session CLI
//!
//! Main entry point for the session bootstrap application.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fadalax_session::bootstrap::{BootstrapOutcome, SessionBootstrapper};
use fadalax_session::cli::{Cli, Commands};
use fadalax_session::config::SessionConfig;
use fadalax_session::oidc::ImplicitFlowClient;
use fadalax_session::users::UserService;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_args();

    let config = SessionConfig::load(&cli.config)?;
    config.validate()?;

    let http = Arc::new(reqwest::Client::new());

    match cli.command {
        Commands::Login { fragment } => {
            tracing::info!(issuer = %config.issuer, "starting session bootstrap");

            let mut client = ImplicitFlowClient::new(Arc::clone(&http));
            if let Some(fragment) = fragment {
                client = client.with_login_fragment(fragment);
            }

            let mut bootstrapper = SessionBootstrapper::new(client, config);
            match bootstrapper.configure().await? {
                BootstrapOutcome::Authenticated => {
                    println!("Authenticated session exists.");
                }
                BootstrapOutcome::RedirectingToLogin => {
                    println!("No valid identity token held; login redirect initiated.");
                }
            }
            Ok(())
        }
        Commands::Whoami { uid } => {
            let users = UserService::new(http, config.api_base.clone());
            let user = users.get_user_info(&uid).await?;
            println!(
                "{} {} <{}> (uid: {})",
                user.first_name, user.last_name, user.email, user.uid
            );
            Ok(())
        }
        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

/// Initializes the tracing subscriber with env-filter support.
///
/// The default level is `info`; set `RUST_LOG` to override.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
