//! Terminal output formatting.

use ciacheck_core::{CiaResult, ResultsSurface, ResultsView, SectionBody};
use colored::{ColoredString, Colorize};
use std::sync::{Arc, Mutex};

/// Output region for the terminal: holds the latest view until the cycle
/// finishes, so it can be printed after the spinner is cleared.
#[derive(Clone, Default)]
pub struct TerminalRegion {
    view: Arc<Mutex<Option<ResultsView>>>,
}

impl TerminalRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<ResultsView> {
        self.view
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ResultsSurface for TerminalRegion {
    fn reveal(&self) {}

    fn replace(&self, view: &ResultsView) -> CiaResult<()> {
        *self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(view.clone());
        Ok(())
    }
}

/// Print a results view.
pub fn print_view(view: &ResultsView) {
    match view {
        ResultsView::Message(message) => {
            println!("{} {}", "✗".red().bold(), message.red());
        }
        ResultsView::Report { summary, sections } => {
            if let Some(line) = summary {
                println!("{}", line.bold());
                println!();
            }

            let width = bar_width();
            for section in sections {
                println!(
                    "{} {}",
                    section.category.icon(),
                    section.category.title().cyan().bold()
                );
                match &section.body {
                    SectionBody::Scored(score) => {
                        println!("  {} / 100", colored_score(score.score));
                        println!("  {}", progress_bar(score.percent(), width));
                        println!("  {} {}", "One-line:".bold(), score.one_line);
                        println!("  {} {}", "Explanation:".bold(), score.explanation);
                        println!("  {} {}", "Suggestion:".bold(), score.suggestion);
                    }
                    SectionBody::Failed(message) => {
                        println!("  {} {}", "✗".red().bold(), message.red());
                    }
                }
                println!();
            }
        }
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

fn bar_width() -> usize {
    term_width().saturating_sub(4).clamp(10, 40)
}

fn colored_score(score: u32) -> ColoredString {
    let text = score.to_string();
    match score {
        80.. => text.green().bold(),
        50..=79 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}

/// Filled/empty bar for a 0-100 percentage.
fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(width - filled).dimmed()
    )
}
