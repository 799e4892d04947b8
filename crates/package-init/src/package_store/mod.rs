//! # Package Stores
//!
//! One [`StoreActor`] per package kind. The store is addressed by
//! `kind + name`: the kind picks the actor, the name picks the object.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreObject`](object_store::StoreObject) implementations for both kinds
//! - [`error`] - [`PackageError`] returned by validation hooks and kind clients
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, client) = package_store::new_providers(32);
//! tokio::spawn(actor.run());
//! let providers = client.list().await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{ConfigurationClient, ProviderClient};
use crate::model::{Configuration, Provider};
use object_store::StoreActor;

/// Creates a new Provider store actor and its client.
pub fn new_providers(buffer_size: usize) -> (StoreActor<Provider>, ProviderClient) {
    let (actor, inner) = StoreActor::new(buffer_size);
    (actor, ProviderClient::new(inner))
}

/// Creates a new Configuration store actor and its client.
pub fn new_configurations(buffer_size: usize) -> (StoreActor<Configuration>, ConfigurationClient) {
    let (actor, inner) = StoreActor::new(buffer_size);
    (actor, ConfigurationClient::new(inner))
}
