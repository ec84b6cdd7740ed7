//! Identifier sanitization.

/// Maps a raw metaschema name to a safe generated identifier.
///
/// Strips a single leading `@`, removes spaces and converts dashes to
/// underscores. Applied to every name taken from schema attributes
/// before it is used as an identifier, a lookup key or a module name.
/// Total and deterministic; two distinct raw names can sanitize to the
/// same identifier, which callers accept.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let name = name.strip_prefix('@').unwrap_or(name);
    name.chars()
        .filter(|c| *c != ' ')
        .map(|c| if c == '-' { '_' } else { c })
        .collect()
}
