//! Shared output formatting for lint results.

use anyhow::Result;
use projcop_core::LintResult;

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print!("{}", result.format_report()),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for error in &result.config_errors {
        println!("{} {RED}configuration error{RESET}", error.rule);
        println!("  {}", error.message);
        println!();
    }

    for violation in &result.violations {
        println!(
            "{} at {}",
            violation.rule,
            violation.path.display()
        );
        println!("  {YELLOW}violation{RESET}: {}", violation.message);
        println!();
    }

    let summary_color = if result.has_config_errors() {
        RED
    } else if result.violations.is_empty() {
        GREEN
    } else {
        YELLOW
    };

    println!(
        "{summary_color}Found {} configuration error(s), {} violation(s) in {} project(s) ({} rule(s) enabled){RESET}",
        result.config_errors.len(),
        result.violations.len(),
        result.projects_checked,
        result.rules_enabled,
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
