//! # Store Messages
//!
//! Message types exchanged between [`StoreClient`](crate::StoreClient) and
//! [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::object::StoreObject;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Result of a `Patch` request.
#[derive(Debug, Clone)]
pub struct PatchOutcome<T> {
    /// The object as stored after the patch.
    pub object: T,
    /// Whether the patch changed desired state.
    pub changed: bool,
}

/// Request sent to a store actor.
///
/// The variants cover what a patching applicator needs: read one object by
/// name, list the kind, create a new object, and patch an existing one.
/// `Update` is for writers of observed state.
#[derive(Debug)]
pub enum StoreRequest<T: StoreObject> {
    Get {
        name: String,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        object: T,
        respond_to: Response<T>,
    },
    Patch {
        name: String,
        patch: T::Patch,
        respond_to: Response<PatchOutcome<T>>,
    },
    Update {
        object: T,
        respond_to: Response<T>,
    },
}
