//! # Package Installer
//!
//! Turns two lists of raw package references into stored Provider and
//! Configuration records.
//!
//! ## Run
//!
//! 1. **Providers** - every provider reference is parsed and named, in input order
//! 2. **Configurations** - the same for configuration references
//! 3. **Applying** - each record of the desired set is created or patched, in order
//!
//! The whole desired set is built before the first store call, so a bad
//! reference anywhere in either list means nothing is written. Once applying
//! starts, the first store failure ends the run and the records before it stay
//! applied. Re-running with the same input leaves the store untouched.
//!
//! ```rust,ignore
//! let installer = PackageInstaller::new(
//!     vec!["xpkg.upbound.io/crossplane/provider-aws:v0.20.0".into()],
//!     vec!["xpkg.upbound.io/crossplane/getting-started:v1".into()],
//! );
//! installer.run(&Context::background(), cluster.client()).await?;
//! ```

pub mod error;

pub use error::*;

use crate::applicator::{Applicator, ApplyOutcome, PatchingApplicator};
use crate::clients::PackageClient;
use crate::context::Context;
use crate::model::PackageKind;
use crate::naming::derive_identifier;
use crate::record::PackageRecord;
use crate::reference::{ImageReferenceParser, ParserOptions, ReferenceParser};
use std::fmt::Display;
use tracing::{error, info};

/// Where an install run is. Reported as the `phase` field of installer logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Providers,
    Configurations,
    Applying,
    Done,
    Failed,
}

impl Display for InstallPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InstallPhase::Providers => "providers",
            InstallPhase::Configurations => "configurations",
            InstallPhase::Applying => "applying",
            InstallPhase::Done => "done",
            InstallPhase::Failed => "failed",
        })
    }
}

/// What a successful run did, per [`ApplyOutcome`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub created: usize,
    pub patched: usize,
    pub unchanged: usize,
}

impl InstallReport {
    fn record(&mut self, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Created => self.created += 1,
            ApplyOutcome::Patched => self.patched += 1,
            ApplyOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// Number of records applied.
    pub fn applied(&self) -> usize {
        self.created + self.patched + self.unchanged
    }
}

/// Installs a fixed set of Providers and Configurations.
///
/// Holds only its input; a run keeps no state between calls, so one installer
/// can be run any number of times.
#[derive(Debug, Clone)]
pub struct PackageInstaller<P: ReferenceParser = ImageReferenceParser> {
    providers: Vec<String>,
    configurations: Vec<String>,
    parser: P,
}

impl PackageInstaller {
    /// Creates an installer using the OCI reference parser with no default
    /// registry.
    pub fn new(providers: Vec<String>, configurations: Vec<String>) -> Self {
        Self::with_parser(
            providers,
            configurations,
            ImageReferenceParser::new(ParserOptions::without_default_registry()),
        )
    }
}

impl<P: ReferenceParser> PackageInstaller<P> {
    pub fn with_parser(providers: Vec<String>, configurations: Vec<String>, parser: P) -> Self {
        Self {
            providers,
            configurations,
            parser,
        }
    }

    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Builds the ordered desired set: every Provider, then every
    /// Configuration, each in input order.
    ///
    /// Stops at the first reference that does not parse.
    pub fn desired_set(&self) -> Result<Vec<PackageRecord>, InstallError> {
        let mut records = Vec::with_capacity(self.providers.len() + self.configurations.len());

        info!(
            phase = %InstallPhase::Providers,
            count = self.providers.len(),
            "Building desired set"
        );
        for raw in &self.providers {
            records.push(self.record(PackageKind::Provider, raw)?);
        }

        info!(
            phase = %InstallPhase::Configurations,
            count = self.configurations.len(),
            "Building desired set"
        );
        for raw in &self.configurations {
            records.push(self.record(PackageKind::Configuration, raw)?);
        }

        Ok(records)
    }

    fn record(&self, kind: PackageKind, raw: &str) -> Result<PackageRecord, InstallError> {
        let reference = self
            .parser
            .parse(raw)
            .map_err(|source| InstallError::PackageNameInvalid {
                kind,
                reference: raw.to_string(),
                source,
            })?;
        Ok(PackageRecord::build(
            kind,
            derive_identifier(&reference),
            reference.to_string(),
        ))
    }

    /// Installs every package through `client`.
    ///
    /// `ctx` is only handed to the client; cancelling it shows up as an
    /// [`InstallError::ApplyFailed`] carrying the client's error.
    pub async fn run<C>(&self, ctx: &Context, client: &C) -> Result<(), InstallError>
    where
        C: PackageClient + ?Sized,
    {
        self.install(ctx, client).await.map(|_| ())
    }

    /// Same as [`run`](Self::run), reporting what each apply did.
    pub async fn install<C>(
        &self,
        ctx: &Context,
        client: &C,
    ) -> Result<InstallReport, InstallError>
    where
        C: PackageClient + ?Sized,
    {
        let result = self.converge(ctx, client).await;
        match &result {
            Ok(report) => info!(
                phase = %InstallPhase::Done,
                applied = report.applied(),
                created = report.created,
                patched = report.patched,
                unchanged = report.unchanged,
                "Packages installed"
            ),
            Err(e) => error!(
                phase = %InstallPhase::Failed,
                error = %e,
                "Package installation failed"
            ),
        }
        result
    }

    async fn converge<C>(&self, ctx: &Context, client: &C) -> Result<InstallReport, InstallError>
    where
        C: PackageClient + ?Sized,
    {
        let records = self.desired_set()?;

        info!(
            phase = %InstallPhase::Applying,
            count = records.len(),
            "Applying desired set"
        );
        let applicator = PatchingApplicator::new(client);
        let mut report = InstallReport::default();
        for record in &records {
            let outcome = applicator
                .apply(ctx, record)
                .await
                .map_err(|source| InstallError::ApplyFailed {
                    kind: record.kind(),
                    name: record.name().to_string(),
                    source,
                })?;
            report.record(outcome);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Reference, ReferenceError};
    use std::error::Error;

    #[test]
    fn test_desired_set_orders_providers_first() {
        let installer = PackageInstaller::new(
            vec!["crossplane/provider-aws:v1".into(), "crossplane/provider-gcp:v1".into()],
            vec!["crossplane/getting-started:v1".into()],
        );

        let set = installer.desired_set().unwrap();
        let kinds: Vec<_> = set.iter().map(PackageRecord::kind).collect();
        let names: Vec<_> = set.iter().map(PackageRecord::name).collect();

        assert_eq!(
            kinds,
            [
                PackageKind::Provider,
                PackageKind::Provider,
                PackageKind::Configuration
            ]
        );
        assert_eq!(
            names,
            [
                "crossplane-provider-aws",
                "crossplane-provider-gcp",
                "crossplane-getting-started"
            ]
        );
        assert_eq!(set[0].package(), "crossplane/provider-aws:v1");
    }

    #[test]
    fn test_bare_reference_gets_no_registry() {
        let installer = PackageInstaller::new(vec!["provider-aws".into()], vec![]);
        let set = installer.desired_set().unwrap();
        assert_eq!(set[0].package(), "provider-aws");
        assert_eq!(set[0].name(), "provider-aws");
        assert!(installer.parser().options().default_registry.is_empty());
    }

    #[test]
    fn test_invalid_configuration_rejects_whole_set() {
        let installer = PackageInstaller::new(
            vec!["crossplane/provider-aws:v1".into()],
            vec!["Not Valid".into()],
        );

        let err = installer.desired_set().unwrap_err();
        assert_eq!(err.to_string(), "package name is not valid: Not Valid");
        let InstallError::PackageNameInvalid { kind, reference, .. } = &err else {
            panic!("expected PackageNameInvalid, got {err:?}");
        };
        assert_eq!(*kind, PackageKind::Configuration);
        assert_eq!(reference, "Not Valid");
        assert!(err.source().is_some());
        assert!(err.store_error().is_none());
    }

    struct RejectAll;

    impl ReferenceParser for RejectAll {
        fn parse(&self, _raw: &str) -> Result<Reference, ReferenceError> {
            Err(ReferenceError::Empty)
        }
    }

    #[test]
    fn test_custom_parser_is_used() {
        let installer = PackageInstaller::with_parser(vec!["a".into()], vec![], RejectAll);
        let err = installer.desired_set().unwrap_err();
        assert!(matches!(
            err,
            InstallError::PackageNameInvalid {
                source: ReferenceError::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(InstallPhase::Providers.to_string(), "providers");
        assert_eq!(InstallPhase::Applying.to_string(), "applying");
        assert_eq!(InstallPhase::Failed.to_string(), "failed");
    }
}
