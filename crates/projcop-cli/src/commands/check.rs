//! Check command implementation.

use anyhow::{bail, Context, Result};
use projcop_core::{Analyzer, RuleBox};
use projcop_rules::{all_rules, rule_ids, rules_by_id};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::discovery;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` if any configuration error or violation was reported.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: &[String],
    source: &ConfigSource,
) -> Result<bool> {
    let config = source.load()?;
    let rules = select_rules(rules_filter)?;
    let projects = discovery::load_projects(path, exclude)?;

    let analyzer = Analyzer::builder()
        .config(config)
        .rules(rules)
        .projects(projects)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze();
    super::output::print(&result, format)?;

    Ok(!result.is_clean())
}

/// Picks the rules named in a comma-separated filter, or all of them.
fn select_rules(filter: Option<&str>) -> Result<Vec<RuleBox>> {
    let Some(filter) = filter else {
        return Ok(all_rules());
    };

    let requested: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    let known = rule_ids();
    if let Some(unknown) = requested
        .iter()
        .find(|id| !known.iter().any(|known_id| known_id == *id))
    {
        bail!("Unknown rule: {unknown}. Run `projcop list-rules` to see available rules.");
    }
    Ok(rules_by_id(&requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.id()).collect()
    }

    #[test]
    fn no_filter_selects_every_rule() {
        assert_eq!(ids(&select_rules(None).unwrap()), rule_ids());
    }

    #[test]
    fn filter_selects_named_rules() {
        let rules = select_rules(Some("NuGetPackageVersions, WarningLevel,")).unwrap();
        assert_eq!(ids(&rules), vec!["WarningLevel", "NuGetPackageVersions"]);
    }

    #[test]
    fn unknown_rule_is_an_error() {
        let err = select_rules(Some("WarningLevel,NoSuchRule"))
            .err()
            .expect("unknown rule should fail");
        assert!(err.to_string().contains("NoSuchRule"));
    }
}
