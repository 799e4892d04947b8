//! # ObjectClient Trait
//!
//! Provides a common interface for kind-specific clients, adding default `get`
//! and `list` methods built on top of a generic `StoreClient`.
use crate::{StoreClient, StoreError, StoreObject};
use async_trait::async_trait;

/// Trait for kind-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust,ignore
/// struct ProviderClient {
///     inner: StoreClient<Provider>,
/// }
///
/// #[async_trait]
/// impl ObjectClient<Provider> for ProviderClient {
///     type Error = PackageError;
///
///     fn inner(&self) -> &StoreClient<Provider> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> Self::Error {
///         PackageError::Store(e)
///     }
/// }
///
/// // get() and list() are provided automatically
/// let provider = client.get("provider-aws").await?;
/// ```
#[async_trait]
pub trait ObjectClient<T: StoreObject>: Send + Sync {
    /// The kind-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the kind-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch an object by name.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn get(&self, name: &str) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(name).await.map_err(Self::map_error)
    }

    /// List every object of the kind, sorted by name.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
