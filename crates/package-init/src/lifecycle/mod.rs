//! # Store Lifecycle
//!
//! Starts the in-memory cluster the initializer installs into and stops it
//! again.
//!
//! [`Cluster::new`] spawns one store actor per package kind and hands out a
//! [`ClusterClient`](crate::clients::ClusterClient). [`Cluster::shutdown`]
//! drops the client, which closes every request channel; each actor then
//! leaves its loop and the cluster waits for the tasks to finish.
//!
//! Clients cloned out of the cluster keep their actor alive, so they must be
//! dropped before `shutdown` can complete.

pub mod cluster;

pub use cluster::*;
