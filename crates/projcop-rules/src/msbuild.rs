//! Helpers for reading MSBuild project properties.
//!
//! Properties live in `PropertyGroup` elements. A group without a
//! `Condition` attribute applies to every build configuration; a group with
//! one applies only to the configuration its condition selects.

use projcop_core::{Element, ProjectDocument};

const PROPERTY_GROUP: &str = "PropertyGroup";
const CONDITION: &str = "Condition";

/// Property groups of a project, split by whether they carry a condition.
#[derive(Debug, Default)]
pub struct PropertyGroups<'a> {
    /// Groups that apply to every configuration, in document order.
    pub unconditional: Vec<&'a Element>,
    /// Groups that apply to one configuration, in document order.
    pub conditional: Vec<&'a Element>,
}

impl<'a> PropertyGroups<'a> {
    /// Collects every `PropertyGroup` below `root`.
    #[must_use]
    pub fn of(root: &'a Element) -> Self {
        let mut groups = Self::default();
        for group in root.descendants_named(PROPERTY_GROUP) {
            if group.attribute(CONDITION).is_some() {
                groups.conditional.push(group);
            } else {
                groups.unconditional.push(group);
            }
        }
        groups
    }
}

/// Returns the trimmed value of the first `name` property inside `group`.
#[must_use]
pub fn property<'a>(group: &'a Element, name: &str) -> Option<&'a str> {
    group
        .descendants()
        .find(|e| e.name() == name)
        .map(|e| e.text().trim())
}

/// Extracts the configuration a group applies to from its condition.
///
/// `'$(Configuration)|$(Platform)' == 'Debug|AnyCPU'` yields `Debug|AnyCPU`.
/// Conditions without a comparison are returned trimmed.
#[must_use]
pub fn configuration_name(group: &Element) -> String {
    let condition = group.attribute(CONDITION).unwrap_or_default();
    let selected = condition
        .split_once("==")
        .map_or(condition, |(_, right)| right);
    selected
        .trim()
        .trim_matches(|c: char| c == '\'' || c == '"')
        .trim()
        .to_string()
}

/// Where a required property setting is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmet {
    /// The project has no configurations and no acceptable global value.
    Project,
    /// The named configuration does not end up with an acceptable value.
    Configuration(String),
}

/// Checks that `name` ends up with an accepted value in every build
/// configuration.
///
/// An unconditional group with an accepted value satisfies the whole
/// project. Otherwise every conditional group must hold an accepted value,
/// falling back to the first unconditional value when it sets none.
pub fn unmet_configurations(
    root: &Element,
    name: &str,
    accepts: impl Fn(&str) -> bool,
) -> Vec<Unmet> {
    let groups = PropertyGroups::of(root);
    let global: Vec<&str> = groups
        .unconditional
        .iter()
        .filter_map(|group| property(group, name))
        .collect();
    if global.iter().copied().any(&accepts) {
        return Vec::new();
    }
    if groups.conditional.is_empty() {
        return vec![Unmet::Project];
    }

    let fallback = global.first().copied();
    groups
        .conditional
        .iter()
        .filter(|group| !property(group, name).or(fallback).is_some_and(&accepts))
        .map(|group| Unmet::Configuration(configuration_name(group)))
        .collect()
}

/// Reports every configuration of `project` where `name` lacks an accepted
/// value, as `"{problem} in project X"` or
/// `"{problem} for configuration C in project X"`.
pub fn require_property(
    project: &ProjectDocument,
    name: &str,
    accepts: impl Fn(&str) -> bool,
    problem: &str,
) -> Vec<String> {
    let file_name = project.file_name();
    unmet_configurations(project.root(), name, accepts)
        .into_iter()
        .map(|unmet| match unmet {
            Unmet::Project => format!("{problem} in project {file_name}"),
            Unmet::Configuration(configuration) => {
                format!("{problem} for configuration {configuration} in project {file_name}")
            }
        })
        .collect()
}

/// Returns true if `value` is `true`, ignoring letter case.
#[must_use]
pub fn is_true(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Returns true if `value` is `false`, ignoring letter case.
#[must_use]
pub fn is_false(value: &str) -> bool {
    value.eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(xml: &str) -> Element {
        Element::parse(xml).unwrap()
    }

    #[test]
    fn splits_groups_by_condition() {
        let root = project(
            r#"<Project>
                 <PropertyGroup><A>1</A></PropertyGroup>
                 <PropertyGroup Condition="'$(Configuration)' == 'Debug'"><A>2</A></PropertyGroup>
               </Project>"#,
        );
        let groups = PropertyGroups::of(&root);
        assert_eq!(groups.unconditional.len(), 1);
        assert_eq!(groups.conditional.len(), 1);
        assert_eq!(property(groups.conditional[0], "A"), Some("2"));
        assert_eq!(property(groups.conditional[0], "B"), None);
    }

    #[test]
    fn extracts_configuration_names() {
        let group = Element::new("PropertyGroup")
            .with_attribute("Condition", " '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ");
        assert_eq!(configuration_name(&group), "Release|AnyCPU");
        let group = Element::new("PropertyGroup").with_attribute("Condition", "Exists('x')");
        assert_eq!(configuration_name(&group), "Exists('x')");
    }

    #[test]
    fn global_value_covers_every_configuration() {
        let root = project(
            r#"<Project>
                 <PropertyGroup><Flag>true</Flag></PropertyGroup>
                 <PropertyGroup Condition="'$(Configuration)' == 'Debug'"><Flag>false</Flag></PropertyGroup>
               </Project>"#,
        );
        assert!(unmet_configurations(&root, "Flag", is_true).is_empty());
    }

    #[test]
    fn reports_each_failing_configuration() {
        let root = project(
            r#"<Project>
                 <PropertyGroup Condition="'$(Configuration)' == 'Debug'"><Flag>true</Flag></PropertyGroup>
                 <PropertyGroup Condition="'$(Configuration)' == 'Release'"/>
                 <PropertyGroup Condition="'$(Configuration)' == 'Test'"><Flag>no</Flag></PropertyGroup>
               </Project>"#,
        );
        assert_eq!(
            unmet_configurations(&root, "Flag", is_true),
            vec![
                Unmet::Configuration("Release".to_string()),
                Unmet::Configuration("Test".to_string()),
            ]
        );
    }

    #[test]
    fn unconditional_value_is_the_fallback() {
        let root = project(
            r#"<Project>
                 <PropertyGroup><Flag>false</Flag></PropertyGroup>
                 <PropertyGroup Condition="'$(Configuration)' == 'Debug'"/>
               </Project>"#,
        );
        assert_eq!(
            unmet_configurations(&root, "Flag", is_false),
            Vec::<Unmet>::new()
        );
        assert_eq!(
            unmet_configurations(&root, "Flag", is_true),
            vec![Unmet::Configuration("Debug".to_string())]
        );
    }

    #[test]
    fn project_without_configurations() {
        let root = project("<Project><PropertyGroup/></Project>");
        assert_eq!(unmet_configurations(&root, "Flag", is_true), vec![Unmet::Project]);
    }
}
