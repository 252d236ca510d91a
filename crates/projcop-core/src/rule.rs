//! Rule traits for defining project rules.

use crate::project::ProjectDocument;
use crate::runner::{self, RuleOutcome};
use crate::section::SectionReader;
use crate::xml::Element;

/// A configurable rule checked against every project.
///
/// Each rule owns a section of the configuration document named by its
/// [`id`](ProjectRule::id). The engine parses that section once per run
/// into [`Config`](ProjectRule::Config) and, only if parsing reported no
/// errors, validates every project with it.
///
/// # Example
///
/// ```
/// use projcop_core::{Element, ProjectDocument, ProjectRule, SectionReader};
///
/// pub struct RequireOutputType;
///
/// impl ProjectRule for RequireOutputType {
///     type Config = ();
///
///     fn id(&self) -> &'static str { "RequireOutputType" }
///
///     fn default_config(&self) -> Element {
///         Element::new(self.id()).with_attribute("enabled", "false")
///     }
///
///     fn parse_config(&self, reader: &mut SectionReader<'_>) {
///         reader.allow_elements(&[]);
///     }
///
///     fn validate(&self, project: &ProjectDocument, _config: &()) -> Vec<String> {
///         if project.root().descendants_named("OutputType").next().is_some() {
///             return Vec::new();
///         }
///         vec![format!("OutputType is not set in project {}", project.file_name())]
///     }
/// }
/// ```
pub trait ProjectRule: Send + Sync {
    /// Parsed form of the rule's configuration section.
    type Config;

    /// Returns the identifier naming the rule and its configuration section.
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns an example section used to seed configuration files.
    ///
    /// The section must parse without errors.
    fn default_config(&self) -> Element;

    /// Reads the rule's section.
    ///
    /// Problems are recorded on `reader` rather than returned; the returned
    /// value must be usable even when errors were recorded.
    fn parse_config(&self, reader: &mut SectionReader<'_>) -> Self::Config;

    /// Checks one project and returns a message per violation.
    fn validate(&self, project: &ProjectDocument, config: &Self::Config) -> Vec<String>;

    /// Parses a section, returning the configuration and every error found.
    fn parse_section(&self, section: &Element) -> (Self::Config, Vec<String>) {
        let mut reader = SectionReader::new(self.id(), section);
        let config = self.parse_config(&mut reader);
        (config, reader.finish())
    }
}

/// Object-safe view of a [`ProjectRule`], used to keep rules with different
/// configuration types in one registry.
pub trait DynRule: Send + Sync {
    /// Returns the rule identifier.
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str;

    /// Returns the rule's default configuration section.
    fn default_config(&self) -> Element;

    /// Parses `section` and validates every project with the result.
    fn evaluate(&self, section: &Element, projects: &[ProjectDocument]) -> RuleOutcome;
}

/// Type alias for boxed rule trait objects.
pub type RuleBox = Box<dyn DynRule>;

/// Boxes a rule for registration.
#[must_use]
pub fn boxed<R: ProjectRule + 'static>(rule: R) -> RuleBox {
    Box::new(Erased(rule))
}

struct Erased<R>(R);

impl<R: ProjectRule> DynRule for Erased<R> {
    fn id(&self) -> &'static str {
        self.0.id()
    }

    fn description(&self) -> &'static str {
        self.0.description()
    }

    fn default_config(&self) -> Element {
        self.0.default_config()
    }

    fn evaluate(&self, section: &Element, projects: &[ProjectDocument]) -> RuleOutcome {
        runner::execute(&self.0, section, projects)
    }
}
