//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the server half of the store. One actor
//! owns every object of one kind and processes requests sequentially, so the
//! `HashMap` it owns needs no locking.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::{PatchOutcome, StoreRequest};
use crate::object::StoreObject;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns all objects of kind `T`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Use**: Clone the client wherever the kind must be read or written.
///
/// ```rust,ignore
/// let (actor, client) = StoreActor::<Provider>::new(32);
/// tokio::spawn(actor.run());
/// let created = client.create(provider).await?;
/// ```
///
/// ## Operations
///
/// * **Get**: returns a clone of the object with that name, or `None`.
/// * **List**: returns every object of the kind, sorted by name.
/// * **Create**:
///     1. Fails with [`StoreError::AlreadyExists`] if the name is taken.
///     2. Sets `resource_version` and `generation` to 1.
///     3. Calls the `on_create` hook and inserts the object.
/// * **Patch**:
///     1. Fails with [`StoreError::NotFound`] if the name is unknown.
///     2. Runs `on_patch` on a copy of the stored object.
///     3. Commits the copy; bookkeeping is bumped only if the patch changed something.
/// * **Update**:
///     1. Fails with [`StoreError::NotFound`] if the name is unknown.
///     2. Replaces the object without running hooks. `resource_version` is
///        bumped, `generation` is kept: only patches change desired state.
pub struct StoreActor<T: StoreObject> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<String, T>,
}

impl<T: StoreObject> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let kind = T::KIND;
        info!(kind, "Store actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { name, respond_to } => {
                    let item = self.store.get(&name).cloned();
                    debug!(kind, %name, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::List { respond_to } => {
                    let mut items: Vec<T> = self.store.values().cloned().collect();
                    items.sort_by(|a, b| a.name().cmp(b.name()));
                    debug!(kind, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Create { object, respond_to } => {
                    let result = self.create(object).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Patch {
                    name,
                    patch,
                    respond_to,
                } => {
                    let result = self.patch(name, patch).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Update { object, respond_to } => {
                    let _ = respond_to.send(self.update(object));
                }
            }
        }

        info!(kind, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, mut object: T) -> Result<T, StoreError> {
        let kind = T::KIND;
        let name = object.name().to_string();
        debug!(kind, %name, ?object, "Create");

        if self.store.contains_key(&name) {
            warn!(kind, %name, "Already exists");
            return Err(StoreError::AlreadyExists { kind, name });
        }

        let meta = object.metadata_mut();
        meta.resource_version = 1;
        meta.generation = 1;

        if let Err(e) = object.on_create().await {
            warn!(kind, %name, error = %e, "on_create failed");
            return Err(StoreError::ObjectError(Box::new(e)));
        }

        self.store.insert(name.clone(), object.clone());
        info!(kind, %name, size = self.store.len(), "Created");
        Ok(object)
    }

    async fn patch(
        &mut self,
        name: String,
        patch: T::Patch,
    ) -> Result<PatchOutcome<T>, StoreError> {
        let kind = T::KIND;
        debug!(kind, %name, ?patch, "Patch");

        let Some(item) = self.store.get_mut(&name) else {
            warn!(kind, %name, "Not found");
            return Err(StoreError::NotFound { kind, name });
        };

        let mut candidate = item.clone();
        let changed = match candidate.on_patch(patch).await {
            Ok(changed) => changed,
            Err(e) => {
                warn!(kind, %name, error = %e, "Patch failed");
                return Err(StoreError::ObjectError(Box::new(e)));
            }
        };

        if changed {
            let meta = candidate.metadata_mut();
            meta.resource_version += 1;
            meta.generation += 1;
            info!(kind, %name, resource_version = meta.resource_version, "Patched");
        } else {
            debug!(kind, %name, "Patch was a no-op");
        }

        *item = candidate;
        Ok(PatchOutcome {
            object: item.clone(),
            changed,
        })
    }

    fn update(&mut self, mut object: T) -> Result<T, StoreError> {
        let kind = T::KIND;
        let name = object.name().to_string();
        debug!(kind, %name, ?object, "Update");

        let Some(item) = self.store.get_mut(&name) else {
            warn!(kind, %name, "Not found");
            return Err(StoreError::NotFound { kind, name });
        };

        let stored = item.metadata();
        let (resource_version, generation) = (stored.resource_version + 1, stored.generation);
        let meta = object.metadata_mut();
        meta.resource_version = resource_version;
        meta.generation = generation;

        *item = object.clone();
        info!(kind, %name, resource_version, "Updated");
        Ok(object)
    }
}
