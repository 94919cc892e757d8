//! Result filtering and pagination
//!
//! A thin, shared stage applied to already-computed results: a string-prefix
//! predicate plus a numeric cap. It operates on the rendered form of each
//! element, so subnet blocks, bare addresses, and VLAN IDs all go through the
//! same path.

use std::fmt::Display;

/// Filter an ordered sequence by string prefix and cap its length.
///
/// An element is kept iff its `Display` rendering starts with `q`; an absent
/// or empty `q` keeps everything. When `limit` is non-zero the scan stops as
/// soon as strictly more than `limit` elements have matched, and the output
/// is truncated to exactly `limit` — the same cutoff boundary as
/// [`IpSplitter::split`](crate::IpSplitter::split). A zero limit means no
/// limit.
pub fn filter_results<T: Display>(
    items: impl IntoIterator<Item = T>,
    q: Option<&str>,
    limit: Option<usize>,
) -> Vec<T> {
    let prefix = q.filter(|q| !q.is_empty());
    let cap = limit.filter(|&l| l > 0);

    let mut results: Vec<T> = Vec::new();
    for item in items {
        if let Some(prefix) = prefix {
            if !item.to_string().starts_with(prefix) {
                continue;
            }
        }
        results.push(item);
        if cap.is_some_and(|cap| results.len() > cap) {
            break;
        }
    }

    if let Some(cap) = cap {
        results.truncate(cap);
    }
    results
}
