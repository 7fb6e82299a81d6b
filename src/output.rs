//! Console output for a run.
//!
//! Each directory visit produces at most one line:
//!
//! ```text
//! wrote docs/index.html
//! [dry-run] write docs/sub/index.html
//! skipped: target already exists and is not a generated file: docs/index.html
//! ```
//!
//! and recursive runs end with a summary:
//!
//! ```text
//! Indexed 12 directories (11 written, 1 skipped)
//! ```
//!
//! `format_*` functions are pure and return the text; `print_*` wrappers
//! write it to stdout. In `--stdout` mode nothing is printed here, so the
//! HTML stream stays clean.

use crate::index::{Outcome, RunSummary};

/// The line reported for one directory, if any.
pub fn format_outcome(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Written(path) => Some(format!("wrote {}", path.display())),
        Outcome::DryRun(path) => Some(format!("[dry-run] write {}", path.display())),
        Outcome::Skipped(reason) => Some(format!("skipped: {reason}")),
        Outcome::Stdout => None,
    }
}

pub fn print_outcome(outcome: &Outcome) {
    if let Some(line) = format_outcome(outcome) {
        println!("{line}");
    }
}

pub fn format_summary(summary: &RunSummary) -> String {
    let noun = if summary.directories == 1 {
        "directory"
    } else {
        "directories"
    };
    format!(
        "Indexed {} {} ({} written, {} skipped)",
        summary.directories, noun, summary.written, summary.skipped
    )
}

pub fn print_summary(summary: &RunSummary) {
    println!("{}", format_summary(summary));
}

/// Fatal error line, including the chain of underlying causes.
pub fn format_error(err: &dyn std::error::Error) -> String {
    let mut line = format!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !line.contains(&cause_text) {
            line.push_str(&format!(": {cause_text}"));
        }
        source = cause.source();
    }
    line
}
