//! Runs one rule's parse → validate lifecycle.

use crate::config::{ConfigDocument, ResolvedSection};
use crate::project::ProjectDocument;
use crate::rule::{DynRule, ProjectRule};
use crate::types::{ConfigurationError, Violation};
use crate::xml::Element;
use tracing::debug;

/// Everything a single rule reported during a run.
///
/// At most one of the two lists is non-empty: a rule with configuration
/// errors validates nothing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Errors found in the rule's configuration section.
    pub config_errors: Vec<ConfigurationError>,
    /// Violations found in the projects.
    pub violations: Vec<Violation>,
}

impl RuleOutcome {
    /// Returns true if the rule reported nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.config_errors.is_empty() && self.violations.is_empty()
    }
}

/// Resolves the rule's section in `config` and runs it over `projects`.
///
/// A disabled rule produces nothing, not even configuration errors.
#[must_use]
pub fn run_rule(
    rule: &dyn DynRule,
    config: &ConfigDocument,
    projects: &[ProjectDocument],
) -> RuleOutcome {
    run_resolved(rule, &config.resolve(rule.id()), projects)
}

/// Runs `rule` with an already resolved section.
#[must_use]
pub fn run_resolved(
    rule: &dyn DynRule,
    section: &ResolvedSection<'_>,
    projects: &[ProjectDocument],
) -> RuleOutcome {
    if !section.enabled {
        debug!("Skipping disabled rule: {}", rule.id());
        return RuleOutcome::default();
    }
    rule.evaluate(&section.element, projects)
}

/// Parses `section` with `rule` and, if that succeeds, validates every
/// project in order.
pub fn execute<R: ProjectRule + ?Sized>(
    rule: &R,
    section: &Element,
    projects: &[ProjectDocument],
) -> RuleOutcome {
    let id = rule.id();
    let (config, errors) = rule.parse_section(section);
    if !errors.is_empty() {
        debug!(
            "Rule {id} has {} configuration error(s), skipping validation",
            errors.len()
        );
        return RuleOutcome {
            config_errors: errors
                .into_iter()
                .map(|message| ConfigurationError::new(id, message))
                .collect(),
            violations: Vec::new(),
        };
    }

    let mut violations = Vec::new();
    for project in projects {
        let messages = rule.validate(project, &config);
        debug!(
            "Rule {id} found {} violation(s) in {}",
            messages.len(),
            project.file_name()
        );
        violations.extend(messages.into_iter().map(|message| {
            Violation::new(id, project.file_name(), project.path(), message)
        }));
    }

    RuleOutcome {
        config_errors: Vec::new(),
        violations,
    }
}
