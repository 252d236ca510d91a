//! Rule requiring a minimal compiler warning level.
//!
//! # Configuration
//!
//! ```xml
//! <WarningLevel>
//!   <MinimalValue>4</MinimalValue>
//!   <Exception>
//!     <Project>Legacy.csproj</Project>
//!     <MinimalValue>2</MinimalValue>
//!   </Exception>
//!   <Exception>
//!     <Project>Generated.csproj</Project>
//!   </Exception>
//! </WarningLevel>
//! ```
//!
//! An exception with its own `MinimalValue` lowers (or raises) the
//! threshold for that project; an exception without one skips the project.
//!
//! # Check
//!
//! A project passes as soon as an unconditional `PropertyGroup` sets a
//! high enough `WarningLevel`. Otherwise the level must be high enough in
//! every configuration-specific group, where a group without its own value
//! inherits the best unconditional one (or 0). Only the first offending
//! level is reported.

use crate::msbuild::{property, PropertyGroups};
use projcop_core::{
    Element, Exception, Exceptions, ProjectDocument, ProjectRule, SectionReader, EXCEPTION,
    PROJECT,
};
use tracing::debug;

/// Rule identifier for warning-level.
pub const ID: &str = "WarningLevel";

const MINIMAL_VALUE: &str = "MinimalValue";
const PROPERTY: &str = "WarningLevel";
const DEFAULT_LEVEL: i64 = 4;

/// Requires the `WarningLevel` property to reach a configured minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarningLevel;

/// Parsed configuration of [`WarningLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningLevelConfig {
    /// Threshold for projects without an exception.
    pub minimal_value: i64,
    /// Per-project thresholds and exemptions.
    pub exceptions: Exceptions<i64>,
}

impl WarningLevel {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for WarningLevel {
    type Config = WarningLevelConfig;

    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires a minimal compiler warning level in every configuration"
    }

    fn default_config(&self) -> Element {
        Element::new(ID)
            .with_attribute("enabled", "false")
            .with_child(Element::new(MINIMAL_VALUE).with_text(DEFAULT_LEVEL.to_string()))
            .with_child(
                Element::new(EXCEPTION)
                    .with_child(
                        Element::new(PROJECT)
                            .with_text("ProjectThatIsAllowedToHaveWarningLevel_2.csproj"),
                    )
                    .with_child(Element::new(MINIMAL_VALUE).with_text("2")),
            )
            .with_child(Element::new(EXCEPTION).with_child(
                Element::new(PROJECT).with_text("AnotherProjectToFullyExcludeFromChecks.csproj"),
            ))
    }

    fn parse_config(&self, reader: &mut SectionReader<'_>) -> WarningLevelConfig {
        reader.allow_elements(&[EXCEPTION, MINIMAL_VALUE]);
        let minimal_value = reader.required_int(MINIMAL_VALUE, DEFAULT_LEVEL);
        let exceptions = reader.exceptions_with(&[PROJECT, MINIMAL_VALUE], |reader, entry| {
            match entry.element.child(MINIMAL_VALUE) {
                Some(value) => Exception::Override(reader.int_value(value, minimal_value)),
                None => Exception::Exempt,
            }
        });
        WarningLevelConfig {
            minimal_value,
            exceptions,
        }
    }

    fn validate(&self, project: &ProjectDocument, config: &WarningLevelConfig) -> Vec<String> {
        let name = project.file_name();
        let required = match config.exceptions.get(name) {
            Some(Exception::Exempt) => {
                debug!("Skipping project excluded from {ID}: {name}");
                return Vec::new();
            }
            Some(Exception::Override(level)) => {
                debug!("Project has exceptional warning level {level}: {name}");
                *level
            }
            None => config.minimal_value,
        };

        let groups = PropertyGroups::of(project.root());
        let mut best_global: Option<i64> = None;
        for group in &groups.unconditional {
            match read_level(group, name) {
                Ok(Some(level)) => best_global = Some(best_global.map_or(level, |b| b.max(level))),
                Ok(None) => {}
                Err(message) => return vec![message],
            }
        }
        if let Some(level) = best_global.filter(|level| *level >= required) {
            debug!("Project has acceptable warning level {level} in global section: {name}");
            return Vec::new();
        }

        let inherited = best_global.unwrap_or(0);
        if groups.conditional.is_empty() {
            return vec![too_low(inherited, required, name)];
        }
        for group in &groups.conditional {
            let level = match read_level(group, name) {
                Ok(level) => level.unwrap_or(inherited),
                Err(message) => return vec![message],
            };
            if level < required {
                return vec![too_low(level, required, name)];
            }
        }
        Vec::new()
    }
}

fn read_level(group: &Element, project: &str) -> Result<Option<i64>, String> {
    let Some(value) = property(group, PROPERTY) else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| format!("Warning level {value} is not a number in project {project}"))
}

fn too_low(level: i64, required: i64, project: &str) -> String {
    format!(
        "Warning level {level} is lower than required {required} in project {project}. \
         Please make sure that setting is active for ALL configurations."
    )
}
