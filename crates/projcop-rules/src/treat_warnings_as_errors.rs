//! Rule requiring compiler warnings to be treated as errors.
//!
//! The `TreatWarningsAsErrors` property must be `true` in every build
//! configuration, either once in an unconditional `PropertyGroup` or in
//! each configuration-specific group.
//!
//! ```xml
//! <TreatWarningsAsErrors>
//!   <Exception>
//!     <Project>Prototype.csproj</Project>
//!   </Exception>
//! </TreatWarningsAsErrors>
//! ```

use crate::msbuild::{is_true, require_property};
use projcop_core::{Element, Exceptions, ProjectDocument, ProjectRule, SectionReader, EXCEPTION, PROJECT};
use tracing::debug;

/// Rule identifier for treat-warnings-as-errors.
pub const ID: &str = "TreatWarningsAsErrors";

/// Requires `TreatWarningsAsErrors` for all configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreatWarningsAsErrors;

impl TreatWarningsAsErrors {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for TreatWarningsAsErrors {
    type Config = Exceptions<()>;

    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires compiler warnings to be treated as errors in every configuration"
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
            debug!("Skipping project excluded from {ID}: {}", project.file_name());
            return Vec::new();
        }
        require_property(
            project,
            "TreatWarningsAsErrors",
            is_true,
            "Warnings are not treated as errors",
        )
    }
}
