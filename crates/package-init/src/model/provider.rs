use crate::model::{PackageSpec, PackageStatus};
use object_store::ObjectMeta;
use serde::{Deserialize, Serialize};

/// A provider package registered in the store.
///
/// # Store
/// This struct implements the [`StoreObject`](object_store::StoreObject) trait
/// (see [`crate::package_store`]), so it can be owned by a
/// [`StoreActor`](object_store::StoreActor) and addressed by `metadata.name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub metadata: ObjectMeta,
    pub spec: PackageSpec,
    #[serde(default)]
    pub status: PackageStatus,
}

impl Provider {
    /// Creates a provider named `name` that installs `package`.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            spec: PackageSpec::new(package),
            status: PackageStatus::default(),
        }
    }
}
