//! The default [`ReferenceParser`]: OCI image references.

use super::{ParserOptions, Reference, ReferenceError, ReferenceParser};
use oci_spec::distribution::Reference as OciReference;

/// Parses OCI image references.
///
/// `oci_spec` validates the grammar and extracts tag and digest. Its Docker
/// Hub defaults (`docker.io`, `library/`, `latest`) are not carried over: a
/// registry, tag or digest is only kept when the raw input spells it out.
#[derive(Debug, Clone, Default)]
pub struct ImageReferenceParser {
    options: ParserOptions,
}

impl ImageReferenceParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }
}

impl ReferenceParser for ImageReferenceParser {
    fn parse(&self, raw: &str) -> Result<Reference, ReferenceError> {
        if raw.is_empty() {
            return Err(ReferenceError::Empty);
        }

        let parsed: OciReference = raw.parse().map_err(|source| ReferenceError::Invalid {
            reference: raw.to_string(),
            source,
        })?;

        let digest = parsed
            .digest()
            .filter(|d| raw.ends_with(&format!("@{d}")))
            .map(str::to_string);
        let name = match &digest {
            Some(d) => &raw[..raw.len() - d.len() - 1],
            None => raw,
        };

        let tag = parsed
            .tag()
            .filter(|t| is_explicit_tag(name, t))
            .map(str::to_string);
        let name = match &tag {
            Some(t) => &name[..name.len() - t.len() - 1],
            None => name,
        };

        let (registry, repository) = match name.split_once('/') {
            Some((first, rest)) if is_registry_component(first) => (first.to_string(), rest),
            _ => (self.options.default_registry.clone(), name),
        };

        if repository.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(ReferenceError::UppercaseRepository(repository.to_string()));
        }

        Ok(Reference {
            registry,
            repository: repository.to_string(),
            tag,
            digest,
        })
    }
}

/// True if `name` ends with `:tag` after its last `/`, i.e. the tag was written
/// out rather than defaulted.
fn is_explicit_tag(name: &str, tag: &str) -> bool {
    let Some(colon) = name.rfind(':') else {
        return false;
    };
    name[colon + 1..] == *tag && name.rfind('/').map_or(true, |slash| colon > slash)
}

/// Same rule `oci_spec` uses to tell a registry host from a repository path.
fn is_registry_component(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}
