//! FunSport CLI - storefront and back office from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse and buy
//! funsport shop home
//! funsport shop product <product-id>
//! funsport shop cart add <product-id> --size 42 --color Đen
//! funsport shop checkout
//!
//! # Back office (needs an admin login)
//! funsport shop login --email admin@funsport.vn --password ...
//! funsport admin dashboard
//! funsport admin orders list --status inprogress
//! ```
//!
//! # Environment Variables
//!
//! - `FUNSPORT_API_URL` - Backend base URL (default: `http://localhost:8000`)
//! - `FUNSPORT_DATA_DIR` - Local storage directory (default: `.funsport`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `RUST_LOG` - Log filter (default: `funsport=info`)
//! - `LOG_FORMAT` - `json` for JSON logs on stderr

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use funsport_storefront::StorefrontConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

use commands::admin::AdminCommand;
use commands::shop::ShopCommand;
use error::CliError;

#[derive(Parser)]
#[command(name = "funsport")]
#[command(author, version, about = "FunSport storefront and back office")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the shop, manage the cart and check out
    Shop {
        #[command(subcommand)]
        action: ShopCommand,
    },
    /// Back-office management (admin session required)
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "funsport=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&CliError::from(e)),
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let result = match cli.command {
        Commands::Shop { action } => commands::shop::run(action, &config).await,
        Commands::Admin { action } => commands::admin::run(action, &config).await,
    };

    match result {
        Ok(output) => {
            print(&output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            fail(&e)
        }
    }
}

#[allow(clippy::print_stdout)]
fn print(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

#[allow(clippy::print_stderr)]
fn fail(err: &CliError) -> ExitCode {
    eprintln!("{}", err.user_message());
    ExitCode::FAILURE
}
