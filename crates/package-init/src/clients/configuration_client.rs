use async_trait::async_trait;
use crate::model::Configuration;
use crate::package_store::PackageError;
use object_store::{ObjectClient, StoreClient, StoreError};

/// Client for the Configuration store.
#[derive(Clone)]
pub struct ConfigurationClient {
    inner: StoreClient<Configuration>,
}

impl ConfigurationClient {
    pub fn new(inner: StoreClient<Configuration>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectClient<Configuration> for ConfigurationClient {
    type Error = PackageError;

    fn inner(&self) -> &StoreClient<Configuration> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PackageError::Store(e)
    }
}
