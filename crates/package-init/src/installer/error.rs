use crate::model::PackageKind;
use crate::reference::ReferenceError;
use object_store::StoreError;
use thiserror::Error;

/// Why an install run stopped.
///
/// Both variants keep the underlying cause reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum InstallError {
    /// A raw reference could not be parsed. Nothing was written.
    #[error("package name is not valid: {reference}")]
    PackageNameInvalid {
        kind: PackageKind,
        reference: String,
        #[source]
        source: ReferenceError,
    },

    /// The store rejected a create, patch or read. Records before this one
    /// are already applied.
    #[error("cannot apply package {kind}/{name}")]
    ApplyFailed {
        kind: PackageKind,
        name: String,
        #[source]
        source: StoreError,
    },
}

impl InstallError {
    /// The store error behind an [`InstallError::ApplyFailed`].
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            InstallError::ApplyFailed { source, .. } => Some(source),
            InstallError::PackageNameInvalid { .. } => None,
        }
    }
}
