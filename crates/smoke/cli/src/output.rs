//! Terminal output for the run verdict

use colored::*;
use node_smoke_core::RunSummary;

/// Print the success line for a run with no failures.
pub fn print_success(summary: &RunSummary) {
    println!("{} {}", "✓".green(), success_message(summary));
}

/// Print a top-level error on stderr.
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

fn success_message(summary: &RunSummary) -> String {
    format!("all {} tests passed", summary.total())
}
