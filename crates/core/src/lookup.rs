//! Name lookup for pick-lists (customers, catalog items).

/// Default number of suggestions returned by [`search_by_name`].
pub const DEFAULT_LOOKUP_LIMIT: usize = 10;

/// Records that can be looked up by a human-readable name.
pub trait Named {
    fn display_name(&self) -> &str;
}

/// Case-insensitive substring search over record names.
///
/// A blank query yields no suggestions. Results keep the input order and are
/// capped at `limit`.
pub fn search_by_name<'a, T: Named>(records: &'a [T], query: &str, limit: usize) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| r.display_name().to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
