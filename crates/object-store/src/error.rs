//! # Store Errors
//!
//! Common error type returned by every store operation. Object-specific
//! failures (a rejected patch, a failed validation hook) are boxed into
//! [`StoreError::ObjectError`] so the chain is preserved for callers.

/// Errors that can occur within the object store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("{kind} {name:?} not found")]
    NotFound { kind: &'static str, name: String },
    #[error("{kind} {name:?} already exists")]
    AlreadyExists { kind: &'static str, name: String },
    #[error("Request cancelled")]
    Cancelled,
    #[error("object rejected the request")]
    ObjectError(#[source] Box<dyn std::error::Error + Send + Sync>),
}
