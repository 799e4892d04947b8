//! # Package Records
//!
//! A [`PackageRecord`] is one entry of the desired set: a fully formed
//! [`Provider`] or [`Configuration`] ready to be applied. Building a record
//! does no validation; the reference parser and name deriver already did.

use crate::model::{Configuration, PackageKind, PackageSpec, Provider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageRecord {
    Provider(Provider),
    Configuration(Configuration),
}

impl PackageRecord {
    /// Builds the record of `kind` named `name` that installs `package`.
    pub fn build(kind: PackageKind, name: impl Into<String>, package: impl Into<String>) -> Self {
        match kind {
            PackageKind::Provider => PackageRecord::Provider(Provider::new(name, package)),
            PackageKind::Configuration => {
                PackageRecord::Configuration(Configuration::new(name, package))
            }
        }
    }

    pub fn kind(&self) -> PackageKind {
        match self {
            PackageRecord::Provider(_) => PackageKind::Provider,
            PackageRecord::Configuration(_) => PackageKind::Configuration,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PackageRecord::Provider(p) => &p.metadata.name,
            PackageRecord::Configuration(c) => &c.metadata.name,
        }
    }

    pub fn spec(&self) -> &PackageSpec {
        match self {
            PackageRecord::Provider(p) => &p.spec,
            PackageRecord::Configuration(c) => &c.spec,
        }
    }

    /// The canonical package reference the record installs.
    pub fn package(&self) -> &str {
        &self.spec().package
    }
}

impl From<Provider> for PackageRecord {
    fn from(provider: Provider) -> Self {
        PackageRecord::Provider(provider)
    }
}

impl From<Configuration> for PackageRecord {
    fn from(configuration: Configuration) -> Self {
        PackageRecord::Configuration(configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_typed_records() {
        let provider = PackageRecord::build(
            PackageKind::Provider,
            "crossplane-provider-aws",
            "crossplane/provider-aws:v1",
        );
        assert_eq!(provider.kind(), PackageKind::Provider);
        assert_eq!(provider.name(), "crossplane-provider-aws");
        assert_eq!(provider.package(), "crossplane/provider-aws:v1");
        assert!(matches!(provider, PackageRecord::Provider(_)));

        let configuration = PackageRecord::build(
            PackageKind::Configuration,
            "getting-started",
            "getting-started:v1",
        );
        assert_eq!(configuration.kind(), PackageKind::Configuration);
        assert!(matches!(configuration, PackageRecord::Configuration(_)));
    }

    #[test]
    fn test_built_record_has_fresh_metadata_and_status() {
        let record = PackageRecord::build(PackageKind::Provider, "p", "p");
        let PackageRecord::Provider(provider) = record else {
            panic!("expected a provider record");
        };
        assert_eq!(provider.metadata.resource_version, 0);
        assert!(provider.metadata.labels.is_empty());
        assert_eq!(provider.status, Default::default());
        assert_eq!(provider.spec.revision_history_limit, None);
    }
}
