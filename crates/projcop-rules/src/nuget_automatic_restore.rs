//! Rule forbidding the legacy MSBuild-integrated NuGet package restore.
//!
//! Old projects import `.nuget\NuGet.targets` and set `RestorePackages` to
//! restore packages during the build. Current tooling restores packages
//! automatically, and the two modes conflict.

use crate::msbuild::{is_true, property, PropertyGroups};
use projcop_core::{Element, Exceptions, ProjectDocument, ProjectRule, SectionReader, EXCEPTION, PROJECT};
use tracing::debug;

/// Rule identifier for nuget-automatic-packages-restore.
pub const ID: &str = "NuGetAutomaticPackagesRestore";

const TARGETS_FILE: &str = "nuget.targets";

/// Requires automatic NuGet package restore.
#[derive(Debug, Clone, Copy, Default)]
pub struct NuGetAutomaticPackagesRestore;

impl NuGetAutomaticPackagesRestore {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for NuGetAutomaticPackagesRestore {
    type Config = Exceptions<()>;

    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids the legacy NuGet.targets package restore mode"
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
        let name = project.file_name();
        if exceptions.is_exempt(name) {
            debug!("Skipping project excluded from {ID}: {name}");
            return Vec::new();
        }

        let mut messages = Vec::new();
        let imports_targets = project
            .root()
            .descendants_named("Import")
            .filter_map(|import| import.attribute("Project"))
            .any(|path| path.to_ascii_lowercase().contains(TARGETS_FILE));
        if imports_targets {
            messages.push(format!(
                "Old NuGet package restore mode (NuGet.targets) is used in project {name}"
            ));
        }

        let groups = PropertyGroups::of(project.root());
        let restores = groups
            .unconditional
            .iter()
            .chain(&groups.conditional)
            .filter_map(|group| property(group, "RestorePackages"))
            .any(is_true);
        if restores {
            messages.push(format!(
                "RestorePackages is enabled in project {name}, use automatic package restore instead"
            ));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        assert_config_fails, assert_default_config_is_valid, assert_disabled, assert_fails,
        assert_passes, project,
    };

    const NO_NUGET: &str = r#"<Project ToolsVersion="12.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <OutputType>Library</OutputType>
  </PropertyGroup>
  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />
</Project>"#;

    const OLD_RESTORE_MODE: &str = r#"<Project ToolsVersion="12.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <SolutionDir Condition="$(SolutionDir) == '' Or $(SolutionDir) == '*Undefined*'">..\</SolutionDir>
    <RestorePackages>true</RestorePackages>
  </PropertyGroup>
  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />
  <Import Project="$(SolutionDir)\.nuget\NuGet.targets" Condition="Exists('$(SolutionDir)\.nuget\NuGet.targets')" />
</Project>"#;

    #[test]
    fn test_passes_without_nuget_targets() {
        assert_passes(
            NuGetAutomaticPackagesRestore,
            "<NuGetAutomaticPackagesRestore/>",
            &project("NoNuGet.csproj", NO_NUGET),
        );
    }

    #[test]
    fn test_passes_for_excepted_project() {
        assert_passes(
            NuGetAutomaticPackagesRestore,
            r"<NuGetAutomaticPackagesRestore>
                <Exception><Project>OldNuGetRestoreMode.csproj</Project></Exception>
                <Exception><Project>SomeOtherProject.csproj</Project></Exception>
              </NuGetAutomaticPackagesRestore>",
            &project("OldNuGetRestoreMode.csproj", OLD_RESTORE_MODE),
        );
    }

    #[test]
    fn test_fails_for_old_restore_mode() {
        let messages = assert_fails(
            NuGetAutomaticPackagesRestore,
            r#"<NuGetAutomaticPackagesRestore enabled="true"/>"#,
            &project("OldNuGetRestoreMode.csproj", OLD_RESTORE_MODE),
        );
        assert_eq!(
            messages,
            vec![
                "Old NuGet package restore mode (NuGet.targets) is used in project OldNuGetRestoreMode.csproj",
                "RestorePackages is enabled in project OldNuGetRestoreMode.csproj, use automatic package restore instead",
            ]
        );
    }

    #[test]
    fn test_fails_for_exception_without_project() {
        assert_config_fails(
            NuGetAutomaticPackagesRestore,
            "<NuGetAutomaticPackagesRestore><Exception>Some text</Exception></NuGetAutomaticPackagesRestore>",
            &project("NoNuGet.csproj", NO_NUGET),
        );
    }

    #[test]
    fn test_unknown_element() {
        let errors = assert_config_fails(
            NuGetAutomaticPackagesRestore,
            "<NuGetAutomaticPackagesRestore><Bogus/></NuGetAutomaticPackagesRestore>",
            &project("OldNuGetRestoreMode.csproj", OLD_RESTORE_MODE),
        );
        assert_eq!(
            errors,
            vec!["Bad configuration for rule NuGetAutomaticPackagesRestore: Unknown element(s) Bogus in configuration."]
        );
    }

    #[test]
    fn test_blank_exception_project() {
        let errors = assert_config_fails(
            NuGetAutomaticPackagesRestore,
            "<NuGetAutomaticPackagesRestore><Exception><Project> </Project></Exception></NuGetAutomaticPackagesRestore>",
            &project("OldNuGetRestoreMode.csproj", OLD_RESTORE_MODE),
        );
        assert_eq!(
            errors,
            vec!["Bad configuration for rule NuGetAutomaticPackagesRestore: <Project> element is missing in exceptions list."]
        );
    }

    #[test]
    fn test_disabled() {
        assert_disabled(
            NuGetAutomaticPackagesRestore,
            r#"<NuGetAutomaticPackagesRestore enabled="false"/>"#,
            &project("OldNuGetRestoreMode.csproj", OLD_RESTORE_MODE),
        );
    }

    #[test]
    fn test_default_config() {
        assert_default_config_is_valid(&NuGetAutomaticPackagesRestore);
    }
}
