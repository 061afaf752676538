//! ciacheck CLI - CIA Security Analyzer
//!
//! Sends a URL to the analysis backend and renders the scored
//! confidentiality/integrity/availability report.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Initialize tracing with optional file logging.
///
/// Console output goes to stderr so `analyze --format html` keeps stdout
/// clean for the rendered markup.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) {
    let default_filter = if verbose {
        "ciacheck=debug,ciacheck_core=debug,ciacheck_web=debug"
    } else {
        "ciacheck=info,ciacheck_core=info,ciacheck_web=debug"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match log_file.and_then(|p| Some((p.parent()?, p.file_name()?))) {
        Some((dir, name)) => {
            let _ = std::fs::create_dir_all(dir);
            let file = tracing_appender::rolling::never(dir, name);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(args.log_file.clone()),
        _ => None,
    };
    init_tracing(log_file.as_deref(), cli.verbose);

    cli.execute().await
}
