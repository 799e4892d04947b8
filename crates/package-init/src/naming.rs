//! # Name Derivation
//!
//! Every package is stored under a name derived from its reference's source
//! (registry + repository, no tag or digest). Re-installing a package at a new
//! version therefore lands on the same object and patches it, instead of
//! creating a second one.
//!
//! Two different sources can map to the same label (`a.b/c` and `a-b/c` both
//! become `a-b-c`). Such packages overwrite each other's reference; the
//! initializer does not try to detect it.

use crate::reference::Reference;

/// Maximum length of a DNS label.
pub const MAX_DNS_LABEL_LEN: usize = 63;

/// Store name for the package identified by `reference`.
pub fn derive_identifier(reference: &Reference) -> String {
    to_dns_label(&reference.source())
}

/// Converts an arbitrary string into a DNS label.
///
/// Letters are lowercased, `.`, `/`, `:` and `-` become `-`, everything else is
/// dropped. Only the first 63 input bytes are considered and separators at the
/// first, last or 63rd position are skipped, so the result never exceeds 63
/// characters and never starts or ends with `-`.
pub fn to_dns_label(s: &str) -> String {
    let bytes = s.as_bytes();
    let last = bytes.len().saturating_sub(1);
    let cut = MAX_DNS_LABEL_LEN - 1;
    let mut label = String::with_capacity(bytes.len().min(MAX_DNS_LABEL_LEN));

    for (i, b) in bytes.iter().map(u8::to_ascii_lowercase).enumerate() {
        match b {
            b'a'..=b'z' | b'0'..=b'9' => label.push(char::from(b)),
            b'.' | b'/' | b':' | b'-' if i != 0 && i != cut && i != last => label.push('-'),
            _ => {}
        }
        if i == cut {
            break;
        }
    }

    label.trim_matches('-').to_string()
}

/// True if `name` is a valid DNS label: 1 to 63 characters of `[a-z0-9-]`,
/// starting and ending with an alphanumeric character.
pub fn is_dns_label(name: &str) -> bool {
    let bytes = name.as_bytes();
    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= MAX_DNS_LABEL_LEN
                && alnum(first)
                && alnum(last)
                && bytes.iter().all(|b| alnum(b) || *b == b'-')
        }
        _ => false,
    }
}
