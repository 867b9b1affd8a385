//! # Stockroom
//!
//! Interactive shop inventory manager.
//!
//! ## Usage
//! ```bash
//! stockroom
//! stockroom --config ./config.toml
//! stockroom --backend table --data ./shop.db
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use stockroom_cli::config::AppConfig;
use stockroom_cli::error::CliError;
use stockroom_cli::{init_tracing, run};
use stockroom_db::BackendKind;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(data) = args.data {
        config.data_path = Some(data);
    }

    if let Err(e) = init_tracing(&config.log_file) {
        eprintln!("Cannot open log file {}: {}", config.log_file.display(), e);
        return ExitCode::FAILURE;
    }

    info!(backend = %config.backend, "Starting Stockroom");

    match run(&config).await {
        Ok(outcome) => {
            info!(?outcome, "Stockroom finished");
            ExitCode::SUCCESS
        }
        Err(CliError::AuthFailed { attempts }) => {
            error!(attempts, "Too many failed logins");
            eprintln!("Too many failed login attempts.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Stockroom failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Command-line overrides of the config file.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    backend: Option<BackendKind>,
    data: Option<PathBuf>,
}

impl Args {
    /// Parses the arguments. `Ok(None)` means help was printed.
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, String> {
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let value = args.next().ok_or("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--backend" | "-b" => {
                    let value = args.next().ok_or("--backend needs file or table")?;
                    parsed.backend = Some(value.parse()?);
                }
                "--data" | "-d" => {
                    let value = args.next().ok_or("--data needs a path")?;
                    parsed.data = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    println!("Stockroom - shop inventory manager");
                    println!();
                    println!("Usage: stockroom [OPTIONS]");
                    println!();
                    println!("Options:");
                    println!("  -c, --config <PATH>     Config file (default: ./config.toml)");
                    println!("  -b, --backend <KIND>    file or table (overrides config)");
                    println!("  -d, --data <PATH>       Store path (overrides config)");
                    println!("  -h, --help              Show this help message");
                    return Ok(None);
                }
                other => return Err(format!("Unknown argument '{}'. Try --help.", other)),
            }
        }

        Ok(Some(parsed))
    }
}
