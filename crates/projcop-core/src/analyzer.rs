//! Core analyzer for orchestrating rule execution.

use crate::config::ConfigDocument;
use crate::project::ProjectDocument;
use crate::rule::{boxed, ProjectRule, RuleBox};
use crate::runner::run_resolved;
use crate::types::LintResult;

use thiserror::Error;
use tracing::info;

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Two registered rules share an identifier.
    #[error("Rule identifier `{0}` is registered more than once")]
    DuplicateRule(&'static str),

    /// A registered rule has an empty identifier.
    #[error("Rule identifiers must not be empty")]
    EmptyRuleId,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    projects: Vec<ProjectDocument>,
    config: Option<ConfigDocument>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: ProjectRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(boxed(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds a project to check.
    #[must_use]
    pub fn project(mut self, project: ProjectDocument) -> Self {
        self.projects.push(project);
        self
    }

    /// Adds several projects to check, keeping their order.
    #[must_use]
    pub fn projects(mut self, projects: impl IntoIterator<Item = ProjectDocument>) -> Self {
        self.projects.extend(projects);
        self
    }

    /// Sets the configuration document.
    #[must_use]
    pub fn config(mut self, config: ConfigDocument) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule identifier is empty or registered twice.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let mut seen: Vec<&'static str> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let id = rule.id();
            if id.is_empty() {
                return Err(AnalyzerError::EmptyRuleId);
            }
            if seen.contains(&id) {
                return Err(AnalyzerError::DuplicateRule(id));
            }
            seen.push(id);
        }

        Ok(Analyzer {
            rules: self.rules,
            projects: self.projects,
            config: self.config.unwrap_or_default(),
        })
    }
}

/// Runs every registered rule over every project.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    projects: Vec<ProjectDocument>,
    config: ConfigDocument,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the registered rules in registration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the projects in input order.
    #[must_use]
    pub fn projects(&self) -> &[ProjectDocument] {
        &self.projects
    }

    /// Returns the configuration document.
    #[must_use]
    pub fn config(&self) -> &ConfigDocument {
        &self.config
    }

    /// Runs the rules and collects their results.
    ///
    /// Rules run in registration order and projects are visited in input
    /// order, so repeated runs over the same inputs give identical results.
    #[must_use]
    pub fn analyze(&self) -> LintResult {
        info!(
            "Checking {} project(s) with {} rule(s)",
            self.projects.len(),
            self.rules.len()
        );

        let mut result = LintResult::new();
        result.projects_checked = self.projects.len();

        for rule in &self.rules {
            let section = self.config.resolve(rule.id());
            if section.enabled {
                result.rules_enabled += 1;
            }
            let outcome = run_resolved(&**rule, &section, &self.projects);
            result.config_errors.extend(outcome.config_errors);
            result.violations.extend(outcome.violations);
        }

        info!(
            "Analysis complete: {} configuration error(s), {} violation(s)",
            result.config_errors.len(),
            result.violations.len()
        );

        result
    }
}
