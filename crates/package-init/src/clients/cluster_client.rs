//! # Cluster Client
//!
//! [`PackageClient`] is the seam between the installer and whatever store holds
//! the packages: read, create and patch, addressed by `kind + name`.
//! [`ClusterClient`] implements it on top of the in-memory package stores.

use crate::clients::{ConfigurationClient, ProviderClient};
use crate::context::Context;
use crate::model::{PackageKind, PackageSpecPatch};
use crate::record::PackageRecord;
use async_trait::async_trait;
use object_store::{ObjectClient, StoreError};
use std::future::Future;
use tracing::{debug, instrument};

/// Store operations needed to converge package records.
///
/// Implementations should honor `ctx` and return [`StoreError::Cancelled`]
/// once it is cancelled.
#[async_trait]
pub trait PackageClient: Send + Sync {
    /// Reads the stored record of `kind` named `name`.
    async fn get(
        &self,
        ctx: &Context,
        kind: PackageKind,
        name: &str,
    ) -> Result<Option<PackageRecord>, StoreError>;

    /// Creates `record`. Fails if a record with the same kind and name exists.
    async fn create(&self, ctx: &Context, record: &PackageRecord) -> Result<(), StoreError>;

    /// Patches the stored record's desired state to match `record`.
    ///
    /// Returns `true` if anything changed.
    async fn patch(&self, ctx: &Context, record: &PackageRecord) -> Result<bool, StoreError>;
}

/// [`PackageClient`] backed by one store actor per kind.
#[derive(Clone)]
pub struct ClusterClient {
    providers: ProviderClient,
    configurations: ConfigurationClient,
}

impl ClusterClient {
    pub fn new(providers: ProviderClient, configurations: ConfigurationClient) -> Self {
        Self {
            providers,
            configurations,
        }
    }

    pub fn providers(&self) -> &ProviderClient {
        &self.providers
    }

    pub fn configurations(&self) -> &ConfigurationClient {
        &self.configurations
    }
}

/// Runs `request` unless `ctx` is cancelled first.
async fn guarded<T>(
    ctx: &Context,
    request: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    if ctx.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(StoreError::Cancelled),
        result = request => result,
    }
}

#[async_trait]
impl PackageClient for ClusterClient {
    #[instrument(skip(self, ctx))]
    async fn get(
        &self,
        ctx: &Context,
        kind: PackageKind,
        name: &str,
    ) -> Result<Option<PackageRecord>, StoreError> {
        debug!("Sending request");
        match kind {
            PackageKind::Provider => {
                let found = guarded(ctx, self.providers.inner().get(name)).await?;
                Ok(found.map(PackageRecord::Provider))
            }
            PackageKind::Configuration => {
                let found = guarded(ctx, self.configurations.inner().get(name)).await?;
                Ok(found.map(PackageRecord::Configuration))
            }
        }
    }

    #[instrument(skip_all, fields(kind = %record.kind(), name = record.name()))]
    async fn create(&self, ctx: &Context, record: &PackageRecord) -> Result<(), StoreError> {
        debug!(package = record.package(), "Sending request");
        match record {
            PackageRecord::Provider(p) => {
                guarded(ctx, self.providers.inner().create(p.clone())).await?;
            }
            PackageRecord::Configuration(c) => {
                guarded(ctx, self.configurations.inner().create(c.clone())).await?;
            }
        }
        Ok(())
    }

    #[instrument(skip_all, fields(kind = %record.kind(), name = record.name()))]
    async fn patch(&self, ctx: &Context, record: &PackageRecord) -> Result<bool, StoreError> {
        debug!(package = record.package(), "Sending request");
        let patch = PackageSpecPatch::from(record.spec());
        let changed = match record {
            PackageRecord::Provider(p) => {
                guarded(ctx, self.providers.inner().patch(p.metadata.name.as_str(), patch))
                    .await?
                    .changed
            }
            PackageRecord::Configuration(c) => {
                guarded(
                    ctx,
                    self.configurations.inner().patch(c.metadata.name.as_str(), patch),
                )
                .await?
                .changed
            }
        };
        Ok(changed)
    }
}
