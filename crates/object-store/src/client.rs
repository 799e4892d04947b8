//! # Generic Client
//!
//! This module defines the generic client for communicating with store actors.

use crate::error::StoreError;
use crate::message::{PatchOutcome, StoreRequest};
use crate::object::StoreObject;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle to a `StoreActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across
/// tasks. Every call resolves to `Result<…, StoreError>`.
pub struct StoreClient<T: StoreObject> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

// Derived Clone would require `T: Clone` on the handle itself.
impl<T: StoreObject> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoreObject> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn get(&self, name: impl Into<String>) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get {
                name: name.into(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, object: T) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { object, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn patch(
        &self,
        name: impl Into<String>,
        patch: T::Patch,
    ) -> Result<PatchOutcome<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Patch {
                name: name.into(),
                patch,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Replaces a stored object, keeping the store's bookkeeping.
    pub async fn update(&self, object: T) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update { object, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
