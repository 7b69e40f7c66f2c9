//! Console output for dirmirror

use console::style;
use dirmirror_config::ProfileCatalog;
use dirmirror_sync::ChangeSummary;
use dirmirror_types::MirrorReporter;
use std::path::Path;

/// Prints mirror decisions as a colored change listing
pub struct ConsoleReporter {
    quiet: bool,
    summary: ChangeSummary,
}

impl ConsoleReporter {
    /// Create a reporter; `quiet` suppresses everything but the run outcome
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            summary: ChangeSummary::default(),
        }
    }

    fn print_change(&self, marker: console::StyledObject<&str>, relative_path: &Path) {
        if !self.quiet {
            println!("{}", change_line(&marker.to_string(), relative_path));
        }
    }
}

impl MirrorReporter for ConsoleReporter {
    fn report_location_start(&mut self, source: &Path) {
        if !self.quiet {
            println!();
            println!("{}", style(format!("Checking '{}'", source.display())).bold());
        }
    }

    fn report_added(&mut self, relative_path: &Path) {
        self.summary.added += 1;
        self.print_change(style("+").green().bold(), relative_path);
    }

    fn report_updated(&mut self, relative_path: &Path) {
        self.summary.updated += 1;
        self.print_change(style("*").yellow().bold(), relative_path);
    }

    fn report_removed(&mut self, relative_path: &Path) {
        self.summary.removed += 1;
        self.print_change(style("\u{2013}").red().bold(), relative_path);
    }

    fn report_run_outcome(&mut self, changed: bool, dry_run: bool) {
        println!();
        display_success(outcome_message(changed, dry_run));
        println!("{}", style(summary_line(&self.summary, dry_run)).dim());
    }
}

/// `  <marker> '<path>'`
pub fn change_line(marker: &str, relative_path: &Path) -> String {
    format!("  {} '{}'", marker, relative_path.display())
}

/// End-of-run message
pub fn outcome_message(changed: bool, dry_run: bool) -> &'static str {
    if dry_run {
        "Dry run finished, no changes were made."
    } else if changed {
        "Backup finished, changes were applied."
    } else {
        "Backup finished, no files needed an update."
    }
}

/// One-line count summary
pub fn summary_line(summary: &ChangeSummary, dry_run: bool) -> String {
    let verb = if dry_run { "pending" } else { "applied" };
    format!(
        "{} added, {} updated, {} removed ({} change(s) {})",
        summary.added,
        summary.updated,
        summary.removed,
        summary.total(),
        verb
    )
}

/// `[n]: name` lines for the profile catalog, numbered from 1
pub fn catalog_lines(catalog: &ProfileCatalog) -> Vec<String> {
    catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("[{}]: {}", index + 1, entry.name))
        .collect()
}

/// Show a failure: messages in red, details in yellow, then the stop notice
pub fn present_failure(error: &anyhow::Error) {
    let (messages, details) = failure_lines(error);

    eprintln!();
    for message in messages {
        eprintln!("{}", style(message).red());
    }
    for detail in details {
        eprintln!("{}", style(detail).yellow());
    }
    eprintln!();
    eprintln!("{}", style("Stopped because of an error.").red().bold());
}

/// Messages and details of a failure, structured when it is a dirmirror error
pub fn failure_lines(error: &anyhow::Error) -> (Vec<String>, Vec<String>) {
    match error.downcast_ref::<dirmirror_types::Error>() {
        Some(error) => (error.messages(), error.details()),
        None => (
            vec![error.to_string()],
            error.chain().skip(1).map(|cause| cause.to_string()).collect(),
        ),
    }
}

/// Display a success message with proper formatting
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), style(message).green());
}

/// Display an info message with proper formatting
pub fn display_info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), style(message).blue());
}

/// Display a warning message with proper formatting
pub fn display_warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}
