//! Shared assertions for rule tests.
//!
//! Every helper wraps the rule section in a `<Rules>` document and runs it
//! through the same path the analyzer uses, so the enabled flag and
//! configuration errors behave exactly as in a real run.

use projcop_core::{
    boxed, run_rule, ConfigDocument, Element, ProjectDocument, ProjectRule, RuleOutcome, ROOT,
};

/// Builds a project document from inline XML.
pub(crate) fn project(path: &str, xml: &str) -> ProjectDocument {
    ProjectDocument::parse(path, xml).expect("project XML should parse")
}

fn run<R: ProjectRule + 'static>(rule: R, section: &str, project: &ProjectDocument) -> RuleOutcome {
    let section = Element::parse(section).expect("section XML should parse");
    let config = ConfigDocument::from_element(Element::new(ROOT).with_child(section));
    run_rule(&*boxed(rule), &config, std::slice::from_ref(project))
}

/// Asserts that the configuration is valid and the project is compliant.
pub(crate) fn assert_passes<R: ProjectRule + 'static>(
    rule: R,
    section: &str,
    project: &ProjectDocument,
) {
    let outcome = run(rule, section, project);
    assert!(
        outcome.is_empty(),
        "expected {} to pass, got {outcome:#?}",
        project.file_name()
    );
}

/// Asserts that the configuration is valid and the project violates the
/// rule. Returns the violation messages.
pub(crate) fn assert_fails<R: ProjectRule + 'static>(
    rule: R,
    section: &str,
    project: &ProjectDocument,
) -> Vec<String> {
    let outcome = run(rule, section, project);
    assert!(
        outcome.config_errors.is_empty(),
        "unexpected configuration errors: {:#?}",
        outcome.config_errors
    );
    assert!(
        !outcome.violations.is_empty(),
        "expected {} to fail",
        project.file_name()
    );
    outcome.violations.into_iter().map(|v| v.message).collect()
}

/// Asserts that the configuration is rejected and nothing is validated.
/// Returns the configuration error messages.
pub(crate) fn assert_config_fails<R: ProjectRule + 'static>(
    rule: R,
    section: &str,
    project: &ProjectDocument,
) -> Vec<String> {
    let outcome = run(rule, section, project);
    assert!(
        !outcome.config_errors.is_empty(),
        "expected configuration errors for {section}"
    );
    assert!(
        outcome.violations.is_empty(),
        "a misconfigured rule must not validate projects: {:#?}",
        outcome.violations
    );
    outcome.config_errors.into_iter().map(|e| e.message).collect()
}

/// Asserts that the rule is disabled and reports nothing at all.
pub(crate) fn assert_disabled<R: ProjectRule + 'static>(
    rule: R,
    section: &str,
    project: &ProjectDocument,
) {
    let document = ConfigDocument::from_element(
        Element::new(ROOT).with_child(Element::parse(section).expect("section XML should parse")),
    );
    let id = rule.id();
    assert!(!document.is_rule_enabled(id), "{id} should be disabled");
    assert!(run(rule, section, project).is_empty());
}

/// Asserts that the default section parses without errors and is disabled.
pub(crate) fn assert_default_config_is_valid<R: ProjectRule>(rule: &R) {
    let section = rule.default_config();
    assert_eq!(section.name(), rule.id());
    let (_, errors) = rule.parse_section(&section);
    assert!(errors.is_empty(), "default config is invalid: {errors:?}");
    let document = ConfigDocument::from_element(Element::new(ROOT).with_child(section));
    assert!(!document.is_rule_enabled(rule.id()));
}
