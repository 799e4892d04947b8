//! # Object Store
//!
//! A small, kind-agnostic object store built on the actor model. It is the
//! store the package initializer converges against: objects are addressed by
//! `kind + name`, created once, and patched afterwards.
//!
//! ## Architecture Overview
//!
//! 1. **Object Layer** ([`StoreObject`]) - what a kind stores and how it accepts patches
//! 2. **Runtime Layer** ([`StoreActor`]) - one task per kind, requests handled sequentially
//! 3. **Interface Layer** ([`StoreClient`], [`ObjectClient`]) - typed async handles
//!
//! ## Concurrency Model
//!
//! - Each kind is owned by one actor running in its own Tokio task
//! - Requests to a kind are processed **sequentially** (no locks)
//! - A single object is always written atomically: patches are applied to a
//!   copy and committed only on success
//!
//! ## Example
//!
//! ```rust,ignore
//! let (actor, client) = StoreActor::<Provider>::new(32);
//! tokio::spawn(actor.run());
//!
//! client.create(provider).await?;
//! let outcome = client.patch("provider-aws", patch).await?;
//! assert!(!outcome.changed);
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted client that needs no running actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod object;
pub mod object_client;
pub mod tracing;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{PatchOutcome, Response, StoreRequest};
pub use object::{ObjectMeta, StoreObject};
pub use object_client::ObjectClient;
