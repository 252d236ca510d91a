//! Init command implementation.

use anyhow::{bail, Context, Result};
use projcop_core::{ConfigDocument, RuleBox};
use projcop_rules::all_rules;
use std::path::Path;

/// Default configuration file written by `projcop init`.
pub const DEFAULT_CONFIG_FILE: &str = "projcop.xml";

/// Runs the init command.
///
/// Writes every rule's default section to `target`. With `update`, an
/// existing file keeps its sections and only gains the missing ones.
pub fn run(target: &Path, force: bool, update: bool) -> Result<()> {
    let rules = all_rules();

    if update && target.exists() {
        let added = update_config(target, &rules)?;
        if added.is_empty() {
            println!("{} already configures every rule", target.display());
        } else {
            println!("Added {} to {}", added.join(", "), target.display());
        }
        return Ok(());
    }

    if target.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite or --update to add missing rules.",
            target.display()
        );
    }

    std::fs::write(target, ConfigDocument::with_defaults(&rules).to_xml())
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("Created {}", target.display());
    println!("\nNext steps:");
    println!("  1. Edit {} and set enabled=\"true\" on the rules you want", target.display());
    println!("  2. Run: projcop check");

    Ok(())
}

/// Appends the default section of every rule missing from the file.
///
/// Returns the identifiers of the rules that were added. The file is only
/// rewritten when something was added.
fn update_config(target: &Path, rules: &[RuleBox]) -> Result<Vec<&'static str>> {
    let content = std::fs::read_to_string(target)
        .with_context(|| format!("Failed to read {}", target.display()))?;
    let mut config = ConfigDocument::parse_named(&target.display().to_string(), &content)?;

    let added = config.add_missing_defaults(rules);
    if !added.is_empty() {
        std::fs::write(target, config.to_xml())
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use projcop_rules::rule_ids;
    use tempfile::TempDir;

    #[test]
    fn creates_config_with_every_rule_disabled() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join(DEFAULT_CONFIG_FILE);

        run(&target, false, false).unwrap();

        let config = ConfigDocument::parse(&std::fs::read_to_string(&target).unwrap()).unwrap();
        for id in rule_ids() {
            assert!(config.root().child(id).is_some(), "{id} missing");
            assert!(!config.is_rule_enabled(id));
        }
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&target, "<Rules/>").unwrap();

        assert!(run(&target, false, false).is_err());
        run(&target, true, false).unwrap();
        assert_ne!(std::fs::read_to_string(&target).unwrap(), "<Rules/>");
    }

    #[test]
    fn update_keeps_existing_sections() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &target,
            "<Rules><WarningLevel><MinimalValue>3</MinimalValue></WarningLevel></Rules>",
        )
        .unwrap();

        let added = update_config(&target, &all_rules()).unwrap();
        assert_eq!(added.len(), rule_ids().len() - 1);
        assert!(!added.contains(&"WarningLevel"));

        let config = ConfigDocument::parse(&std::fs::read_to_string(&target).unwrap()).unwrap();
        let section = config.resolve("WarningLevel");
        assert!(section.enabled);
        assert_eq!(
            section.element.child("MinimalValue").map(projcop_core::Element::text),
            Some("3")
        );

        assert!(update_config(&target, &all_rules()).unwrap().is_empty());
    }

    #[test]
    fn update_keeps_text_inside_sections() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &target,
            "<Rules><TreatWarningsAsErrors><Exception>legacy build<Project>X.csproj</Project></Exception></TreatWarningsAsErrors></Rules>",
        )
        .unwrap();

        update_config(&target, &all_rules()).unwrap();

        let config = ConfigDocument::parse(&std::fs::read_to_string(&target).unwrap()).unwrap();
        let exception = config
            .root()
            .child("TreatWarningsAsErrors")
            .and_then(|section| section.child("Exception"))
            .unwrap();
        assert_eq!(exception.text().trim(), "legacy build");
        assert_eq!(
            exception.child("Project").map(projcop_core::Element::text),
            Some("X.csproj")
        );
    }
}
