//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use ciacheck_core::AnalyzerConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod analyze;
pub mod serve;

/// CIA Security Analyzer - score a URL for confidentiality, integrity and availability
#[derive(Parser)]
#[command(name = "ciacheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "CIACHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Analysis backend base URL (overrides config and CIACHECK_BACKEND_URL)
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a URL
    Analyze(analyze::AnalyzeArgs),

    /// Start the web page
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref(), self.backend)?;

        match self.command {
            Commands::Analyze(args) => analyze::execute(args, &config).await,
            Commands::Serve(args) => serve::execute(args, &config).await,
        }
    }
}

fn load_config(path: Option<&std::path::Path>, backend: Option<String>) -> Result<AnalyzerConfig> {
    let config = AnalyzerConfig::load(path).context("Failed to load configuration")?;
    match backend {
        Some(url) => config
            .with_backend_url(url)
            .context("Invalid --backend value"),
        None => Ok(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_backend_flag_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nurl = \"http://file:1\"\ntimeout_secs = 7").unwrap();

        let config = load_config(Some(file.path()), Some("http://flag:2".to_string())).unwrap();
        assert_eq!(config.backend_url, "http://flag:2");
        assert_eq!(config.request_timeout_secs, Some(7));
    }

    #[test]
    fn test_invalid_backend_flag_is_rejected() {
        let err = load_config(None, Some("not a url".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Invalid --backend value");
    }

    #[test]
    fn test_missing_config_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_config(Some(&missing), None).is_err());
    }
}
