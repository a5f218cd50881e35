// demos/storefront/src/main.rs

// Declare modules for the application
mod cli;
mod commands;
mod config;
mod errors;
mod state;

use crate::cli::Cli;
use crate::config::StorefrontConfig;
use crate::errors::Result as AppResult; // Use the app's Result alias
use crate::state::AppState;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trolley::UnconfiguredCheckout;

#[tokio::main]
async fn main() {
  // Logs go to stderr so command output on stdout stays clean. RUST_LOG overrides the default level.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match run(cli).await {
    Ok(output) => print!("{}", output),
    Err(e) => {
      tracing::error!(error = %e, "Command failed.");
      eprintln!("error: {}", e);
      std::process::exit(e.exit_code());
    }
  }
}

async fn run(cli: Cli) -> AppResult<String> {
  let config = StorefrontConfig::from_env()?;
  tracing::info!(data_dir = %config.data_dir.display(), "Opening storefront.");

  let state = AppState::build(config)?;

  // Checkout has no backend yet; a real one would be injected here.
  let checkout = UnconfiguredCheckout;
  let output = commands::dispatch(&state, cli.command, &checkout).await?;

  // Deferred persistence: make sure this "page load" reaches disk before exit.
  state.cart.write().flush();
  if !state.cart.read().persistence_healthy() {
    eprintln!("warning: your cart could not be saved and will not survive a restart");
  }
  Ok(output)
}
