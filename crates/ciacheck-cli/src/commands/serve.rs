//! Web server command.

use anyhow::Result;
use ciacheck_core::{AnalyzerConfig, HttpAnalysisGateway};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = ".ciacheck/serve.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, config: &AnalyzerConfig) -> Result<()> {
    let gateway = Arc::new(HttpAnalysisGateway::new(config)?);

    println!();
    println!("  {} {}", "ciacheck".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}   http://{}:{}", "Analyzer".green(), args.host, args.port);
    println!("  {}    {}", "Backend".green(), gateway.endpoint());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    ciacheck_web::run_server(gateway, &args.host, args.port).await?;

    Ok(())
}
