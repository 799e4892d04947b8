use crate::model::{PackageSpec, PackageStatus};
use object_store::ObjectMeta;
use serde::{Deserialize, Serialize};

/// A configuration package registered in the store.
///
/// Same shape as [`Provider`](crate::model::Provider); kept as its own type so
/// the two kinds live in separate stores and cannot be mixed up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub metadata: ObjectMeta,
    pub spec: PackageSpec,
    #[serde(default)]
    pub status: PackageStatus,
}

impl Configuration {
    /// Creates a configuration named `name` that installs `package`.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            spec: PackageSpec::new(package),
            status: PackageStatus::default(),
        }
    }
}
