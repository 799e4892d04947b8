//! Spec and status fields shared by every package kind.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The two kinds of package the initializer installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageKind {
    Provider,
    Configuration,
}

impl PackageKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Provider => "Provider",
            PackageKind::Configuration => "Configuration",
        }
    }
}

impl Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the package manager pulls the package image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullPolicy {
    Always,
    Never,
    IfNotPresent,
}

/// Whether new revisions become active on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationPolicy {
    Automatic,
    Manual,
}

/// Desired state of a package.
///
/// Only `package` is set by the initializer. The optional fields belong to
/// whoever manages the package afterwards and survive every re-apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    /// Canonical image reference of the package.
    pub package: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_pull_policy: Option<PullPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_activation_policy: Option<ActivationPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_crossplane_constraints: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_dependency_resolution: Option<bool>,
}

impl PackageSpec {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Merges the set fields of `patch` into the spec.
    ///
    /// Returns `true` if any field changed.
    pub fn merge(&mut self, patch: PackageSpecPatch) -> bool {
        let mut changed = false;
        changed |= merge_field(&mut self.package, patch.package);
        changed |= merge_option(&mut self.package_pull_policy, patch.package_pull_policy);
        changed |= merge_option(
            &mut self.revision_activation_policy,
            patch.revision_activation_policy,
        );
        changed |= merge_option(&mut self.revision_history_limit, patch.revision_history_limit);
        changed |= merge_option(
            &mut self.ignore_crossplane_constraints,
            patch.ignore_crossplane_constraints,
        );
        changed |= merge_option(
            &mut self.skip_dependency_resolution,
            patch.skip_dependency_resolution,
        );
        changed
    }
}

fn merge_field<T: PartialEq>(field: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *field != value => {
            *field = value;
            true
        }
        _ => false,
    }
}

fn merge_option<T: PartialEq>(field: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(value) if field.as_ref() != Some(&value) => {
            *field = Some(value);
            true
        }
        _ => false,
    }
}

/// Merge patch for [`PackageSpec`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpecPatch {
    pub package: Option<String>,
    pub package_pull_policy: Option<PullPolicy>,
    pub revision_activation_policy: Option<ActivationPolicy>,
    pub revision_history_limit: Option<i64>,
    pub ignore_crossplane_constraints: Option<bool>,
    pub skip_dependency_resolution: Option<bool>,
}

impl From<&PackageSpec> for PackageSpecPatch {
    /// The patch that converges a stored spec toward `spec`: the package is
    /// always set, optional fields only when the desired spec sets them.
    fn from(spec: &PackageSpec) -> Self {
        Self {
            package: Some(spec.package.clone()),
            package_pull_policy: spec.package_pull_policy,
            revision_activation_policy: spec.revision_activation_policy,
            revision_history_limit: spec.revision_history_limit,
            ignore_crossplane_constraints: spec.ignore_crossplane_constraints,
            skip_dependency_resolution: spec.skip_dependency_resolution,
        }
    }
}

/// A single observed condition of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: bool,
    #[serde(default)]
    pub reason: String,
}

/// Observed state of a package, written by the package manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_revision: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_same_package_is_noop() {
        let mut spec = PackageSpec::new("crossplane/provider-aws:v1");
        let changed = spec.merge(PackageSpecPatch::from(&PackageSpec::new(
            "crossplane/provider-aws:v1",
        )));
        assert!(!changed);
    }

    #[test]
    fn test_merge_new_package_keeps_optional_fields() {
        let mut spec = PackageSpec::new("crossplane/provider-aws:v1");
        spec.revision_history_limit = Some(3);
        spec.package_pull_policy = Some(PullPolicy::Always);

        let changed = spec.merge(PackageSpecPatch::from(&PackageSpec::new(
            "crossplane/provider-aws:v2",
        )));

        assert!(changed);
        assert_eq!(spec.package, "crossplane/provider-aws:v2");
        assert_eq!(spec.revision_history_limit, Some(3));
        assert_eq!(spec.package_pull_policy, Some(PullPolicy::Always));
    }

    #[test]
    fn test_merge_sets_optional_field_once() {
        let mut spec = PackageSpec::new("a");
        let patch = PackageSpecPatch {
            revision_activation_policy: Some(ActivationPolicy::Manual),
            ..PackageSpecPatch::default()
        };
        assert!(spec.merge(patch.clone()));
        assert!(!spec.merge(patch));
        assert_eq!(spec.package, "a");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PackageKind::Provider.to_string(), "Provider");
        assert_eq!(PackageKind::Configuration.to_string(), "Configuration");
    }
}
