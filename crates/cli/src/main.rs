mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dentaloffice", version, about = "Dental Office Cloud API adapter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (JSON or TOML). Without it, `DENTAL_OFFICE_*` variables
    /// are used, then the usual config file locations.
    #[arg(long, global = true, env = "DENTAL_OFFICE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one operation over a batch of items.
    Run {
        /// Resource name: user, dentist, customer, schedule, chair.
        #[arg(short, long)]
        resource: String,
        /// Operation name: create, list, get, update, delete, getAvailableHours.
        #[arg(short, long)]
        operation: String,
        /// JSON file holding an array of parameter objects, or a single object.
        #[arg(short, long)]
        items: Option<PathBuf>,
        /// Record failed items in the output instead of aborting.
        #[arg(long, default_value_t = false)]
        continue_on_fail: bool,
    },
    /// List supported resource/operation pairs.
    Operations,
    /// Check credentials by requesting an access token.
    Token,
    /// Print the option catalogs accepted by numeric parameters.
    Options,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // Logs go to stderr; stdout carries command output only.
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "dentaloffice starting");

    match cli.command {
        Commands::Run { resource, operation, items, continue_on_fail } => {
            commands::run(
                cli.config,
                &resource,
                &operation,
                items.as_deref(),
                continue_on_fail,
            )
            .await
        }
        Commands::Operations => {
            commands::print_operations();
            Ok(())
        }
        Commands::Token => commands::check_token(cli.config).await,
        Commands::Options => {
            commands::print_options();
            Ok(())
        }
    }
}
