//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for every binary in the
//! workspace.
//!
//! - **Structured fields**: `kind`, `name`, `package`, `phase` are recorded as fields, not
//!   interpolated into messages.
//! - **Levels**: store requests log at `debug`, effective writes and lifecycle
//!   events at `info`, rejected requests at `warn`.
//! - **Filter**: taken from `RUST_LOG`.
//!
//! ```bash
//! # Phase transitions and writes
//! RUST_LOG=info package-init
//!
//! # Every store request with its payload
//! RUST_LOG=debug package-init
//!
//! # Only the store
//! RUST_LOG=object_store=debug package-init
//! ```
//!
//! A converging run at `info` reads like:
//!
//! ```text
//! INFO Store actor started kind="Provider"
//! INFO Store actor started kind="Configuration"
//! INFO Building desired set phase="providers" count=1
//! INFO Building desired set phase="configurations" count=1
//! INFO Applying desired set phase="applying" count=2
//! INFO Created kind="Provider" name="xpkg-upbound-io-crossplane-provider-aws" size=1
//! INFO Created kind="Configuration" name="xpkg-upbound-io-crossplane-getting-started" size=1
//! INFO Packages installed phase="done" applied=2
//! ```

/// Installs the global `tracing` subscriber.
///
/// Uses a compact format without targets; the `kind` field already says which
/// store a line comes from.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
