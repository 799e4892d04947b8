//! # Package References
//!
//! A package is identified by an image reference such as
//! `xpkg.upbound.io/crossplane/provider-aws:v0.20.0`. This module turns raw
//! user strings into a validated [`Reference`] and exposes the
//! [`ReferenceParser`] seam so another naming scheme can be plugged into the
//! installer.
//!
//! ## Grammar
//!
//! ```text
//! reference  := [registry "/"] repository [":" tag] ["@" digest]
//! registry   := host [":" port]        (first component containing '.' or ':', or "localhost")
//! repository := component ("/" component)*
//! component  := [a-z0-9] ([a-z0-9._-]* [a-z0-9])?
//! tag        := [A-Za-z0-9_] [A-Za-z0-9_.-]{0,127}
//! digest     := algorithm ":" hex
//! ```
//!
//! The grammar itself is checked by [`oci_spec::distribution::Reference`];
//! this module only decides which part is the registry and keeps the input's
//! spelling.
//!
//! ## No default registry
//! The parser never guesses a registry. A bare `crossplane/provider-aws`
//! stays registry-less unless [`ParserOptions::default_registry`] is set, and
//! the installer always leaves it empty.

pub mod parser;

pub use parser::*;

use oci_spec::distribution::ParseError;
use std::fmt::Display;
use thiserror::Error;

/// A validated image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    registry: String,
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl Reference {
    /// The registry host, if the reference names one.
    pub fn registry(&self) -> Option<&str> {
        (!self.registry.is_empty()).then_some(self.registry.as_str())
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Registry and repository without tag or digest.
    ///
    /// This is what identifies the package independent of its version.
    pub fn source(&self) -> String {
        match self.registry() {
            Some(registry) => format!("{registry}/{}", self.repository),
            None => self.repository.clone(),
        }
    }
}

impl Display for Reference {
    /// The canonical form: `[registry/]repository[:tag][@digest]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source())?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}

/// Why a raw string is not a valid reference.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference is empty")]
    Empty,
    #[error("invalid reference {reference:?}")]
    Invalid {
        reference: String,
        #[source]
        source: ParseError,
    },
    #[error("repository {0:?} must be lowercase")]
    UppercaseRepository(String),
}

/// Parses raw strings into canonical references.
pub trait ReferenceParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<Reference, ReferenceError>;
}

/// Configuration of [`ImageReferenceParser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Registry given to references that do not name one. Empty means none.
    pub default_registry: String,
}

impl ParserOptions {
    /// Options that leave registry-less references registry-less.
    pub fn without_default_registry() -> Self {
        Self::default()
    }

    pub fn with_default_registry(registry: impl Into<String>) -> Self {
        Self {
            default_registry: registry.into(),
        }
    }
}
