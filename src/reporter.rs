use crate::outcome::Outcome;
use crate::runner::RunSummary;

/// Print the per-row status line: `<uid>: <status> (<detail>)`. One line
/// per processed row, in processing order.
pub fn report(outcome: &Outcome) {
    println!("{}", outcome);
}

/// Print the end-of-run counters.
pub fn report_summary(summary: &RunSummary) {
    println!();
    println!("Batch complete:");
    println!("  Processed: {}", summary.processed);
    println!("  Successful: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Skipped: {}", summary.skipped);
}
