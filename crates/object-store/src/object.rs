//! # StoreObject Trait
//!
//! The `StoreObject` trait defines the contract every stored kind (Provider,
//! Configuration, …) must implement to be managed by the generic [`StoreActor`].
//! Objects are addressed by `kind + name`: the kind is the associated constant
//! [`StoreObject::KIND`], the name lives in the object's [`ObjectMeta`].
//!
//! # Desired state vs. bookkeeping
//! The store owns the bookkeeping fields of [`ObjectMeta`] (`resource_version`
//! and `generation`). Objects own everything else and decide, in
//! [`StoreObject::on_patch`], whether a patch changed their desired state.
//! A patch that changes nothing leaves the bookkeeping untouched, which is what
//! makes create-or-patch convergence idempotent.
//!
//! [`StoreActor`]: crate::StoreActor

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Metadata common to every stored object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Unique key of the object within its kind.
    pub name: String,

    /// Bumped by the store on every effective write.
    #[serde(default)]
    pub resource_version: u64,

    /// Bumped by the store whenever desired state changes.
    #[serde(default)]
    pub generation: u64,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Metadata carrying only a name, as sent by clients on create.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Trait that any stored kind must implement to be managed by `StoreActor`.
///
/// # Async hooks
/// The trait is `#[async_trait]` so hooks may await (e.g. to consult another
/// store). Both hooks run inside the owning actor task, one request at a time.
#[async_trait]
pub trait StoreObject: Clone + Send + Sync + Debug + 'static {
    /// Kind name used in logs and errors (e.g. `"Provider"`).
    const KIND: &'static str;

    /// Partial update applied by `Patch` requests.
    type Patch: Send + Sync + Debug;

    /// The error type for this kind.
    type Error: std::error::Error + Send + Sync + 'static;

    fn metadata(&self) -> &ObjectMeta;

    fn metadata_mut(&mut self) -> &mut ObjectMeta;

    fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Called before a new object is inserted. Reject invalid objects here.
    async fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a patch to the object.
    ///
    /// Returns `true` when desired state changed. The actor applies the patch
    /// to a copy and only commits it on success.
    async fn on_patch(&mut self, patch: Self::Patch) -> Result<bool, Self::Error>;
}
