//! # projcop-rules
//!
//! Built-in project rules for projcop.
//!
//! Each rule reads its own section of the configuration document, named by
//! the rule identifier, and checks MSBuild project files.
//!
//! ## Available Rules
//!
//! | Id | Description |
//! |----|-------------|
//! | `WarningLevel` | Requires a minimal compiler warning level |
//! | `TreatWarningsAsErrors` | Requires warnings to be treated as errors |
//! | `TreatStyleCopWarningsAsErrors` | Requires StyleCop warnings to be treated as errors |
//! | `NuGetPackageVersions` | Restricts packages to approved versions |
//! | `NuGetAutomaticPackagesRestore` | Forbids the legacy `NuGet.targets` restore |
//!
//! ## Usage
//!
//! ```ignore
//! use projcop_core::{Analyzer, ConfigDocument};
//! use projcop_rules::all_rules;
//!
//! let analyzer = Analyzer::builder()
//!     .config(ConfigDocument::parse(&config_xml)?)
//!     .rules(all_rules())
//!     .projects(projects)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod msbuild;
mod nuget_automatic_restore;
mod nuget_package_versions;
mod registry;
mod stylecop_warnings_as_errors;
#[cfg(test)]
mod test_support;
mod treat_warnings_as_errors;
pub mod version;
mod warning_level;

pub use nuget_automatic_restore::NuGetAutomaticPackagesRestore;
pub use nuget_package_versions::{
    NuGetPackageVersions, PackageRule, PackageVersionsConfig, PACKAGES_CONFIG,
};
pub use registry::{all_rules, rule_ids, rules_by_id};
pub use stylecop_warnings_as_errors::TreatStyleCopWarningsAsErrors;
pub use treat_warnings_as_errors::TreatWarningsAsErrors;
pub use version::{NuGetVersion, VersionSpec};
pub use warning_level::{WarningLevel, WarningLevelConfig};

/// Re-export core types for convenience.
pub use projcop_core::{ConfigurationError, ProjectRule, RuleBox, Violation};
