//! # Convergence Apply
//!
//! An [`Applicator`] makes the store hold a record: create it when absent,
//! patch its desired state when present. Applying the same record twice leaves
//! the store as after the first apply.

use crate::clients::PackageClient;
use crate::context::Context;
use crate::record::PackageRecord;
use async_trait::async_trait;
use object_store::StoreError;
use tracing::{debug, info};

/// What an apply did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Patched,
    Unchanged,
}

#[async_trait]
pub trait Applicator: Send + Sync {
    async fn apply(&self, ctx: &Context, record: &PackageRecord)
        -> Result<ApplyOutcome, StoreError>;
}

/// Create-if-absent, patch-if-present applicator over a [`PackageClient`].
///
/// Store errors are returned unmodified.
pub struct PatchingApplicator<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: PackageClient + ?Sized> PatchingApplicator<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a, C: PackageClient + ?Sized> Applicator for PatchingApplicator<'a, C> {
    async fn apply(
        &self,
        ctx: &Context,
        record: &PackageRecord,
    ) -> Result<ApplyOutcome, StoreError> {
        let kind = record.kind();
        let name = record.name();

        if self.client.get(ctx, kind, name).await?.is_none() {
            self.client.create(ctx, record).await?;
            info!(%kind, name, package = record.package(), "Created package");
            return Ok(ApplyOutcome::Created);
        }

        if self.client.patch(ctx, record).await? {
            info!(%kind, name, package = record.package(), "Patched package");
            Ok(ApplyOutcome::Patched)
        } else {
            debug!(%kind, name, "Package already up to date");
            Ok(ApplyOutcome::Unchanged)
        }
    }
}
