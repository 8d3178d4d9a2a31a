//! Selection strategies: locate the entry owning a draw in the cumulative
//! weight space.
//!
//! The entry list is sorted ascending by key with `range_start` ascending,
//! so the owner of a draw `r` is the last entry whose `range_start <= r`.
//! Two strategies find it: a containment scan with better constants for
//! small lists, and a binary search that wins asymptotically. They return
//! identical results for identical inputs; the table picks one purely by
//! entry count.

use crate::entry::Indexed;

/// Scan for the entry whose interval contains `draw`.
pub fn linear<'a, K, V>(entries: &'a [Indexed<K, V>], draw: u64) -> Option<&'a Indexed<K, V>> {
    for entry in entries {
        if entry.range_start <= draw && draw < entry.range_start + entry.weight {
            return Some(entry);
        }
    }
    return None;
}

/// Binary-search for the entry whose interval contains `draw`.
///
/// Relies on `range_start` being non-decreasing over the list.
pub fn binary<'a, K, V>(entries: &'a [Indexed<K, V>], draw: u64) -> Option<&'a Indexed<K, V>> {
    // Find the largest i such that entries[i].range_start <= draw.
    let mut lo = 0;
    let mut hi = entries.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if entries[mid].range_start <= draw {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    // lo is one past the candidate.
    if lo == 0 {
        return None;
    }
    let entry = &entries[lo - 1];
    if draw < entry.range_start + entry.weight {
        return Some(entry);
    }
    return None;
}
