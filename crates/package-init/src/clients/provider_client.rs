//! # Provider Client
//!
//! Wraps a `StoreClient<Provider>`; reads come from [`ObjectClient`].
use async_trait::async_trait;
use crate::model::Provider;
use crate::package_store::PackageError;
use object_store::{ObjectClient, StoreClient, StoreError};

/// Client for the Provider store.
#[derive(Clone)]
pub struct ProviderClient {
    inner: StoreClient<Provider>,
}

impl ProviderClient {
    pub fn new(inner: StoreClient<Provider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectClient<Provider> for ProviderClient {
    type Error = PackageError;

    fn inner(&self) -> &StoreClient<Provider> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PackageError::Store(e)
    }
}
