//! Error types for the package stores.

use crate::model::PackageKind;
use object_store::StoreError;
use thiserror::Error;

/// Errors that can occur during package store operations.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The object name is not a DNS label.
    #[error("{kind} name {name:?} is not a valid DNS label")]
    InvalidName { kind: PackageKind, name: String },

    /// The package reference is empty.
    #[error("{kind} {name:?} has an empty package reference")]
    EmptyPackage { kind: PackageKind, name: String },

    /// An error occurred while communicating with the store.
    #[error("store request failed")]
    Store(#[from] StoreError),
}
