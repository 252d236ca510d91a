//! Rule restricting NuGet packages to an approved list of versions.
//!
//! # Configuration
//!
//! ```xml
//! <NuGetPackageVersions>
//!   <Package id="Newtonsoft.Json" version="[13.0.1]" />
//!   <Package id="xunit" version="[2.4, 3.0)" />
//!   <Exception>
//!     <Project>Sandbox.csproj</Project>
//!   </Exception>
//! </NuGetPackageVersions>
//! ```
//!
//! Packages are read from the project's `packages.config` companion and from
//! `PackageReference` items. Every package must be listed, and its version
//! must satisfy the listed range (see [`VersionSpec`]).

use crate::version::{NuGetVersion, VersionSpec};
use projcop_core::{Element, Exceptions, ProjectDocument, ProjectRule, SectionReader, EXCEPTION, PROJECT};
use tracing::debug;

/// Rule identifier for nuget-package-versions.
pub const ID: &str = "NuGetPackageVersions";

/// File name of the legacy package list kept next to a project.
pub const PACKAGES_CONFIG: &str = "packages.config";

const PACKAGE: &str = "Package";

/// Requires every referenced package to match an approved version range.
#[derive(Debug, Clone, Copy, Default)]
pub struct NuGetPackageVersions;

/// An approved package and its version range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRule {
    /// Package identifier, compared without regard to letter case.
    pub id: String,
    /// The range as written in the configuration.
    pub version: String,
    spec: VersionSpec,
}

/// Parsed configuration of [`NuGetPackageVersions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersionsConfig {
    /// Approved packages in configuration order.
    pub packages: Vec<PackageRule>,
    /// Projects that are not checked.
    pub exceptions: Exceptions<()>,
}

impl PackageVersionsConfig {
    fn rule_for(&self, id: &str) -> Option<&PackageRule> {
        self.packages.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }
}

/// A package used by a project.
struct UsedPackage<'a> {
    id: &'a str,
    version: &'a str,
}

impl NuGetPackageVersions {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for NuGetPackageVersions {
    type Config = PackageVersionsConfig;

    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires NuGet packages to match approved versions"
    }

    fn default_config(&self) -> Element {
        let package = |id: &str, version: &str| {
            Element::new(PACKAGE)
                .with_attribute("id", id)
                .with_attribute("version", version)
        };
        Element::new(ID)
            .with_attribute("enabled", "false")
            .with_child(package("first-package-id", "1.0.0"))
            .with_child(package("second-package-id", "[2.0.3]"))
            .with_child(package("third-package-id", "[1.5.0, 2.0.0)"))
            .with_child(
                Element::new(EXCEPTION)
                    .with_child(Element::new(PROJECT).with_text("ProjectToExcludeFromCheck.csproj")),
            )
    }

    fn parse_config(&self, reader: &mut SectionReader<'_>) -> PackageVersionsConfig {
        reader.allow_elements(&[EXCEPTION, PACKAGE]);
        let exceptions = reader.exemptions();

        let mut packages = Vec::new();
        for element in reader.section().children_named(PACKAGE) {
            let (Some(id), Some(version)) = (element.attribute("id"), element.attribute("version"))
            else {
                reader.bad_configuration(format_args!(
                    "<{PACKAGE}> element must have id and version attributes."
                ));
                continue;
            };
            let (id, version) = (id.trim(), version.trim());
            match VersionSpec::parse(version) {
                Some(spec) => packages.push(PackageRule {
                    id: id.to_string(),
                    version: version.to_string(),
                    spec,
                }),
                None => reader.error(format!(
                    "Cannot parse package version rule {version} for package {id} in config {ID}"
                )),
            }
        }

        PackageVersionsConfig {
            packages,
            exceptions,
        }
    }

    fn validate(&self, project: &ProjectDocument, config: &PackageVersionsConfig) -> Vec<String> {
        let name = project.file_name();
        if config.exceptions.is_exempt(name) {
            debug!("Skipping project excluded from {ID}: {name}");
            return Vec::new();
        }

        used_packages(project)
            .into_iter()
            .filter_map(|used| check_package(config, &used, name))
            .collect()
    }
}

fn check_package(config: &PackageVersionsConfig, used: &UsedPackage<'_>, project: &str) -> Option<String> {
    let UsedPackage { id, version } = *used;
    let Some(rule) = config.rule_for(id) else {
        return Some(format!(
            "Unknown package {id} with version {version} in project {project}"
        ));
    };
    let Some(parsed) = NuGetVersion::parse(version) else {
        return Some(format!(
            "Cannot parse version {version} of package {id} in project {project}"
        ));
    };
    if rule.spec.satisfies(&parsed) {
        return None;
    }
    Some(format!(
        "Version {version} for package {id} does not match rule {} in project {project}",
        rule.version
    ))
}

/// Packages from `packages.config` followed by `PackageReference` items.
fn used_packages(project: &ProjectDocument) -> Vec<UsedPackage<'_>> {
    let mut used = Vec::new();

    if let Some(packages) = project.companion(PACKAGES_CONFIG) {
        for package in packages.children_named("package") {
            match (package.attribute("id"), package.attribute("version")) {
                (Some(id), Some(version)) => used.push(UsedPackage { id, version }),
                _ => debug!(
                    "Ignoring package entry without id or version in {PACKAGES_CONFIG} of {}",
                    project.file_name()
                ),
            }
        }
    }

    for reference in project.root().descendants_named("PackageReference") {
        let Some(id) = reference.attribute("Include") else {
            continue;
        };
        let version = reference
            .attribute("Version")
            .or_else(|| reference.child("Version").map(|v| v.text().trim()));
        match version {
            Some(version) => used.push(UsedPackage { id, version }),
            None => debug!(
                "Package reference {id} has no version in {}, skipping",
                project.file_name()
            ),
        }
    }

    used
}
