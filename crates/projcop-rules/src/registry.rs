//! The built-in rule registry.

use crate::{
    NuGetAutomaticPackagesRestore, NuGetPackageVersions, TreatStyleCopWarningsAsErrors,
    TreatWarningsAsErrors, WarningLevel,
};
use projcop_core::{boxed, RuleBox};

/// Returns every built-in rule.
///
/// The order is fixed; it decides the order of findings in a report.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        boxed(WarningLevel::new()),
        boxed(TreatWarningsAsErrors::new()),
        boxed(TreatStyleCopWarningsAsErrors::new()),
        boxed(NuGetPackageVersions::new()),
        boxed(NuGetAutomaticPackagesRestore::new()),
    ]
}

/// Identifiers of every built-in rule, in registry order.
#[must_use]
pub fn rule_ids() -> Vec<&'static str> {
    all_rules().iter().map(|rule| rule.id()).collect()
}

/// Returns the built-in rules whose identifiers are listed in `ids`.
///
/// Registry order is kept regardless of the order of `ids`. Unknown
/// identifiers are ignored; check them against [`rule_ids`] first.
#[must_use]
pub fn rules_by_id(ids: &[&str]) -> Vec<RuleBox> {
    all_rules()
        .into_iter()
        .filter(|rule| ids.contains(&rule.id()))
        .collect()
}
