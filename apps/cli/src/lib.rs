//! # Stockroom CLI Library
//!
//! Login and menu session for the Stockroom inventory manager.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (tracing setup, app entry)
//! ├── config.rs       ◄─── config.toml + environment overrides
//! ├── auth.rs         ◄─── Credential check, login prompt
//! ├── menu.rs         ◄─── Command parsing, logo, menu, manual
//! ├── session.rs      ◄─── Interactive loop over the Inventory
//! └── error.rs        ◄─── CliError
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod menu;
pub mod session;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use stockroom_db::{Backend, Inventory, RecordStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::auth::PasswordSource;
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::session::{Session, SessionOutcome};

/// Initializes the tracing subscriber, writing to `log_file`.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom_db=trace` - Trace the stores only
/// - Default: INFO, DEBUG for the stockroom crates
pub fn init_tracing(log_file: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Opens the configured store, runs the login and the menu session on the
/// process's stdin and stdout, then closes the store.
pub async fn run(config: &AppConfig) -> CliResult<SessionOutcome> {
    let path = config.store_path();
    info!(backend = %config.backend, path = %path.display(), "Opening store");
    let backend = Backend::open(config.backend, path).await?;
    info!(kind = %backend.kind(), location = %backend.location(), "Store opened");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(e) = auth::login(config, &mut input, &mut output, PasswordSource::detect()) {
        error!(error = %e, "Login aborted");
        backend.close().await;
        return Err(e);
    }

    let mut session = Session::new(Inventory::new(backend), input, output);
    let outcome = session.run().await;

    let (inventory, _, _) = session.into_parts();
    inventory.into_store().close().await;
    info!("Store closed");

    outcome
}
