//! `bitbattle check`: run a circuit against a truth table.
//!
//! Loads the circuit and the table, runs every row through the test runner,
//! prints each row verdict to stderr, and prints the result summary (or the
//! full submission payload with `--format json`) to stdout.

use std::time::Duration;

use bitbattle_sim::score::daily_score;
use bitbattle_sim::{
    Metrics, RowResult, RunObserver, RunnerOptions, Submission, TestRunner, TruthTable,
};

use crate::project::{budget, load_config, read_circuit, weights};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Prints row verdicts as they arrive.
struct RowPrinter {
    enabled: bool,
    verbose: bool,
}

impl RunObserver for RowPrinter {
    fn row_finished(&mut self, row: &RowResult) {
        if !self.enabled {
            return;
        }
        eprintln!("{}", row_line(row));
        if self.verbose {
            for c in &row.checks {
                eprintln!(
                    "       {} = {} (expected {}, depth {})",
                    c.label, c.actual, c.expected, c.depth
                );
            }
        }
    }
}

/// Formats one row verdict, listing each mismatched output.
fn row_line(row: &RowResult) -> String {
    if row.passed {
        return format!("   row {} ... ok", row.row);
    }
    let mismatches: Vec<String> = row
        .checks
        .iter()
        .filter(|c| !c.matches())
        .map(|c| format!("{} expected {}, got {}", c.label, c.expected, c.actual))
        .collect();
    format!("   row {} ... FAILED ({})", row.row, mismatches.join("; "))
}

/// Runs the `bitbattle check` command.
///
/// Returns exit code 0 if every row passes, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let netlist = read_circuit(&args.circuit)?;
    let table = TruthTable::from_json(&std::fs::read_to_string(&args.table)?)?;

    let text = args.format == ReportFormat::Text;
    if text && !global.quiet {
        eprintln!(
            "   Checking {} against {} row(s)",
            args.circuit.display(),
            table.row_count()
        );
    }

    let options = RunnerOptions {
        row_delay: Duration::from_millis(args.row_delay_ms.unwrap_or(config.runner.row_delay_ms)),
        budget: budget(&config),
    };
    let mut printer = RowPrinter {
        enabled: text && !global.quiet,
        verbose: global.verbose,
    };
    let report = TestRunner::with_options(&netlist, options).run_with(&table, &mut printer)?;

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                let failed = report.rows.len() - report.passed_rows();
                eprintln!();
                eprintln!(
                    "   Result: {} passed, {failed} failed; {} gate(s), longest path {}",
                    report.passed_rows(),
                    report.gate_count,
                    report.longest_path
                );
                if let (true, Some(secs)) = (report.passed(), args.elapsed_secs) {
                    let metrics = Metrics {
                        gate_count: report.gate_count,
                        longest_path: report.longest_path,
                        duration: Duration::from_secs(secs),
                    };
                    eprintln!("   Score: {}", daily_score(&metrics, &weights(&config)));
                }
            }
            println!("{}", serde_json::to_string(&report.summary())?);
        }
        ReportFormat::Json => {
            println!("{}", Submission::new(&netlist, &report).to_json()?);
        }
    }

    Ok(if report.passed() { 0 } else { 1 })
}
