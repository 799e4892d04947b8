//! # Package Initializer
//!
//! Installs a fixed list of Crossplane-style packages into a cluster store and
//! converges: running it again with the same input changes nothing, and running
//! it with a new version of a package patches the existing object in place.
//!
//! ## Core Components
//!
//! - **[reference]**: Parses raw image references; never injects a default registry.
//! - **[naming]**: Derives the DNS-label name a package is stored under.
//! - **[record]**: Builds the typed [`Provider`](model::Provider) or
//!   [`Configuration`](model::Configuration) record to apply.
//! - **[applicator]**: Create-or-patch over a [`PackageClient`](clients::PackageClient).
//! - **[installer]**: Runs the whole batch, fail-fast, Providers first.
//! - **[lifecycle]**: Starts and stops the in-memory [`Cluster`](lifecycle::Cluster).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let cluster = Cluster::new(32);
//! let installer = PackageInstaller::new(providers, configurations);
//! installer.run(&Context::background(), cluster.client()).await?;
//! cluster.shutdown().await?;
//! ```
//!
//! ## Testing
//!
//! See [`object_store::mock`] for a scripted store client; the installer can
//! also be run against any hand-written [`PackageClient`](clients::PackageClient).

pub mod applicator;
pub mod clients;
pub mod config;
pub mod context;
pub mod installer;
pub mod lifecycle;
pub mod model;
pub mod naming;
pub mod package_store;
pub mod record;
pub mod reference;
