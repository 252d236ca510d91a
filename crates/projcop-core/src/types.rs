//! Report types produced by the engine.

use serde::Serialize;
use std::path::PathBuf;

/// A defect in a rule's own configuration section.
///
/// Configuration errors are produced only while parsing a section and stop
/// that rule from validating any project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationError {
    /// Identifier of the misconfigured rule.
    pub rule: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// A project failing a correctly configured rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Identifier of the rule that reported the violation.
    pub rule: String,
    /// File name of the project.
    pub project: String,
    /// Path of the project file as supplied to the analyzer.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        project: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            project: project.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {}",
            self.path.display(),
            self.rule,
            self.message
        )
    }
}

/// Result of running every registered rule over every project.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    /// Configuration errors, in rule registration order.
    pub config_errors: Vec<ConfigurationError>,
    /// Violations, grouped by rule in registration order and by project in
    /// input order within each rule.
    pub violations: Vec<Violation>,
    /// Number of projects supplied.
    pub projects_checked: usize,
    /// Number of rules that were enabled.
    pub rules_enabled: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.config_errors.is_empty() && self.violations.is_empty()
    }

    /// Returns true if any rule was misconfigured.
    #[must_use]
    pub fn has_config_errors(&self) -> bool {
        !self.config_errors.is_empty()
    }

    /// Violations reported for the project with the given file name.
    pub fn violations_for<'a>(&'a self, project: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.project == project)
    }

    /// Formats the result as a plain-text report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();
        for error in &self.config_errors {
            let _ = writeln!(output, "config error {error}");
        }
        for violation in &self.violations {
            let _ = writeln!(output, "{violation}");
        }
        let _ = writeln!(
            output,
            "{} configuration error(s), {} violation(s) in {} project(s)",
            self.config_errors.len(),
            self.violations.len(),
            self.projects_checked
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LintResult {
        LintResult {
            config_errors: vec![ConfigurationError::new(
                "NuGetPackageVersions",
                "Cannot parse package version rule [1.0 for package A in config NuGetPackageVersions",
            )],
            violations: vec![
                Violation::new("WarningLevel", "App.csproj", "src/App.csproj", "too low"),
                Violation::new("WarningLevel", "Lib.csproj", "src/Lib.csproj", "too low"),
            ],
            projects_checked: 2,
            rules_enabled: 2,
        }
    }

    #[test]
    fn test_is_clean() {
        assert!(LintResult::new().is_clean());
        assert!(!sample().is_clean());
        assert!(sample().has_config_errors());
    }

    #[test]
    fn test_violations_for_project() {
        let result = sample();
        assert_eq!(result.violations_for("Lib.csproj").count(), 1);
        assert_eq!(result.violations_for("Other.csproj").count(), 0);
    }

    #[test]
    fn test_display() {
        let v = Violation::new("WarningLevel", "App.csproj", "src/App.csproj", "too low");
        assert_eq!(v.to_string(), "src/App.csproj: [WarningLevel] too low");
        let e = ConfigurationError::new("WarningLevel", "bad");
        assert_eq!(e.to_string(), "[WarningLevel] bad");
    }

    #[test]
    fn test_format_report_summary() {
        let report = sample().format_report();
        assert!(report.starts_with("config error [NuGetPackageVersions]"));
        assert!(report.ends_with("1 configuration error(s), 2 violation(s) in 2 project(s)\n"));
    }
}
