//! Analysis command.

use anyhow::{Context, Result};
use ciacheck_core::{
    AnalysisHandler, AnalyzerConfig, HtmlRegion, HttpAnalysisGateway, Outcome, ResultsSurface,
    Selection,
};
use clap::{Args, ValueEnum};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::output::{self, TerminalRegion};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Coloured terminal report
    Text,
    /// Markup of the results region
    Html,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Category to analyze
    #[arg(value_parser = Selection::TOKENS)]
    pub category: String,

    /// URL to analyze (prompted for when omitted)
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn execute(args: AnalyzeArgs, config: &AnalyzerConfig) -> Result<()> {
    let selection: Selection = args.category.parse()?;

    let raw_url = match args.url {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("URL")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read URL")?,
    };

    let gateway = Arc::new(HttpAnalysisGateway::new(config)?);

    let outcome = match args.format {
        OutputFormat::Html => {
            let region = HtmlRegion::new();
            let outcome = run_with_spinner(gateway, Arc::new(region.clone()), selection, &raw_url).await;
            println!("{}", region.markup());
            outcome
        }
        OutputFormat::Text => {
            let region = TerminalRegion::new();
            let outcome = run_with_spinner(gateway, Arc::new(region.clone()), selection, &raw_url).await;
            if let Some(view) = region.view() {
                output::print_view(&view);
            }
            outcome
        }
    };

    debug!(?outcome, "Analysis finished");

    match failure_reason(&outcome) {
        Some(reason) => anyhow::bail!("Analysis ended without a report: {}", reason),
        None => Ok(()),
    }
}

/// Why a cycle produced no report, or `None` when one was rendered.
fn failure_reason(outcome: &Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Rendered => None,
        Outcome::InputRejected(_) => Some("invalid input"),
        Outcome::ServerError(_) => Some("the analysis backend reported an error"),
        Outcome::ConnectivityFailed => Some("could not reach the analysis backend"),
    }
}

async fn run_with_spinner(
    gateway: Arc<HttpAnalysisGateway>,
    surface: Arc<dyn ResultsSurface>,
    selection: Selection,
    raw_url: &str,
) -> Outcome {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Running {} analysis...", selection));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = AnalysisHandler::new(gateway, surface).run(selection, raw_url).await;

    spinner.finish_and_clear();
    outcome
}
