//! Typed clients for the package stores.

pub mod cluster_client;
pub mod configuration_client;
pub mod provider_client;

pub use cluster_client::*;
pub use configuration_client::*;
pub use provider_client::*;
