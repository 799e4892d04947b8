//! [`StoreObject`] implementations for [`Provider`] and [`Configuration`].
//!
//! Both kinds validate the same way on create and accept the same
//! [`PackageSpecPatch`]; only the kind differs.

use crate::model::{Configuration, PackageKind, PackageSpecPatch, Provider};
use crate::naming::is_dns_label;
use crate::package_store::PackageError;
use async_trait::async_trait;
use object_store::{ObjectMeta, StoreObject};

macro_rules! impl_package_object {
    ($ty:ty, $kind:expr) => {
        #[async_trait]
        impl StoreObject for $ty {
            const KIND: &'static str = $kind.as_str();
            type Patch = PackageSpecPatch;
            type Error = PackageError;

            fn metadata(&self) -> &ObjectMeta {
                &self.metadata
            }

            fn metadata_mut(&mut self) -> &mut ObjectMeta {
                &mut self.metadata
            }

            /// Rejects names that are not DNS labels and empty package references.
            async fn on_create(&mut self) -> Result<(), Self::Error> {
                if !is_dns_label(&self.metadata.name) {
                    return Err(PackageError::InvalidName {
                        kind: $kind,
                        name: self.metadata.name.clone(),
                    });
                }
                if self.spec.package.is_empty() {
                    return Err(PackageError::EmptyPackage {
                        kind: $kind,
                        name: self.metadata.name.clone(),
                    });
                }
                Ok(())
            }

            /// Merges the patch into `spec`. Status and metadata are never touched.
            async fn on_patch(&mut self, patch: PackageSpecPatch) -> Result<bool, Self::Error> {
                if patch.package.as_deref() == Some("") {
                    return Err(PackageError::EmptyPackage {
                        kind: $kind,
                        name: self.metadata.name.clone(),
                    });
                }
                Ok(self.spec.merge(patch))
            }
        }
    };
}

impl_package_object!(Provider, PackageKind::Provider);
impl_package_object!(Configuration, PackageKind::Configuration);
