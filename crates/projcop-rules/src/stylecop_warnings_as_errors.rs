//! Rule requiring StyleCop findings to break the build.
//!
//! StyleCop's MSBuild integration downgrades its errors to warnings unless
//! `StyleCopTreatErrorsAsWarnings` is `false`. The property must be `false`
//! in every build configuration.

use crate::msbuild::{is_false, require_property};
use projcop_core::{Element, Exceptions, ProjectDocument, ProjectRule, SectionReader, EXCEPTION, PROJECT};
use tracing::debug;

/// Rule identifier for treat-stylecop-warnings-as-errors.
pub const ID: &str = "TreatStyleCopWarningsAsErrors";

/// Requires StyleCop violations to be reported as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreatStyleCopWarningsAsErrors;

impl TreatStyleCopWarningsAsErrors {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for TreatStyleCopWarningsAsErrors {
    type Config = Exceptions<()>;

    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires StyleCop warnings to be treated as errors in every configuration"
    }

    fn default_config(&self) -> Element {
        Element::new(ID)
            .with_attribute("enabled", "false")
            .with_child(
                Element::new(EXCEPTION)
                    .with_child(Element::new(PROJECT).with_text("ProjectToExcludeFromCheck.csproj")),
            )
    }

    fn parse_config(&self, reader: &mut SectionReader<'_>) -> Exceptions<()> {
        reader.allow_elements(&[EXCEPTION]);
        reader.exemptions()
    }

    fn validate(&self, project: &ProjectDocument, exceptions: &Exceptions<()>) -> Vec<String> {
        if exceptions.is_exempt(project.file_name()) {
            debug!(
                "Skipping project with disabled StyleCop warnings as an exception: {}",
                project.file_name()
            );
            return Vec::new();
        }
        require_property(
            project,
            "StyleCopTreatErrorsAsWarnings",
            is_false,
            "StyleCop warnings are not treated as errors",
        )
    }
}
