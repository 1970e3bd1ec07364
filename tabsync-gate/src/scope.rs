//! Route scope matching.

use tabsync_types::ScopeMode;

/// Strips the query string and fragment from a location.
#[must_use]
pub fn route_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}

/// Returns true if `path` is `entry` itself or lies underneath it.
///
/// `/shop` matches `/shop` and `/shop/widgets`, but not `/shopping`.
#[must_use]
pub fn path_matches(path: &str, entry: &str) -> bool {
    path == entry
        || path
            .strip_prefix(entry)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Decides whether `location` falls inside a feature's rollout scope.
///
/// Blank entries are malformed: they never widen an allowlist, and any blank
/// entry in a denylist closes the scope entirely. A location that is not an
/// absolute path is never in scope.
#[must_use]
pub fn is_in_scope<S: AsRef<str>>(location: &str, mode: ScopeMode, scope_paths: &[S]) -> bool {
    let path = route_path(location);
    if !path.starts_with('/') {
        return false;
    }

    let mut entries = scope_paths.iter().map(|s| s.as_ref().trim());
    match mode {
        ScopeMode::Allowlist => entries.any(|entry| !entry.is_empty() && path_matches(path, entry)),
        ScopeMode::Denylist => !entries.any(|entry| entry.is_empty() || path_matches(path, entry)),
    }
}
