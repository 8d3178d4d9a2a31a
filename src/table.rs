//! The weighted round-robin table: index builder plus mutation facade.
//!
//! Design decisions:
//!
//! 1. **Full rebuild on every mutation**: `set`, `add`, `replace`, and
//!    `remove` all reconstruct the ordered, range-annotated entry list from
//!    scratch. There is no incremental patching of ranges: correctness over
//!    efficiency, appropriate for small-to-moderate entry counts.
//!
//! 2. **Deterministic ordering**: candidates are deduplicated by key (last
//!    write wins) through an `FxHashMap`, then sorted ascending by key, then
//!    assigned cumulative ranges starting at 0. The same entry set always
//!    produces the same table.
//!
//! 3. **Memoryless selection**: each `next()` is an independent weighted
//!    draw, not a deterministic cycle. The draw comes from an injected
//!    [`DrawSource`], so selection is scriptable under test.
//!
//! 4. **No internal locking**: callers share a table across threads only
//!    under external synchronization.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::draw::DrawSource;
use crate::draw::ThreadDraws;
use crate::entry::Entry;
use crate::entry::Indexed;
use crate::select;

/// Fallback weight for entries constructed with weight 0.
pub const DEFAULT_WEIGHT: u64 = 100;

/// Entry count at which selection switches from linear scan to binary
/// search.
pub const SELECTION_THRESHOLD: usize = 10;

/// Inline capacity sized for the linear-scan regime, where most tables live.
type EntryList<K, V> = SmallVec<[Indexed<K, V>; 8]>;

/// Per-table configuration, fixed at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Weight substituted for entries whose weight is 0.
    pub default_weight: u64,
    /// Entry count at which `next()` switches to binary search.
    pub selection_threshold: usize,
}

impl Default for TableConfig {
    fn default() -> TableConfig {
        return TableConfig {
            default_weight: DEFAULT_WEIGHT,
            selection_threshold: SELECTION_THRESHOLD,
        };
    }
}

/// A weighted round-robin table over keyed, weighted entries.
///
/// Each call to [`next`](Wrr::next) returns one entry's value, chosen with
/// probability proportional to its weight. The entry set can be mutated
/// between selections; every mutation rebuilds the cumulative-range index.
pub struct Wrr<K, V, S = ThreadDraws> {
    entries: EntryList<K, V>,
    total_weight: u64,
    config: TableConfig,
    draws: S,
}

impl<K: Ord + Hash, V> Wrr<K, V, ThreadDraws> {
    /// Create a table with the default configuration and the thread RNG.
    pub fn new(entries: impl IntoIterator<Item = Entry<K, V>>) -> Wrr<K, V, ThreadDraws> {
        return Wrr::with_config(entries, TableConfig::default());
    }

    /// Create a table with an explicit configuration and the thread RNG.
    pub fn with_config(
        entries: impl IntoIterator<Item = Entry<K, V>>,
        config: TableConfig,
    ) -> Wrr<K, V, ThreadDraws> {
        return Wrr::with_source(entries, config, ThreadDraws::new());
    }
}

impl<K: Ord + Hash, V, S: DrawSource> Wrr<K, V, S> {
    /// Create a table with an explicit configuration and draw source.
    pub fn with_source(
        entries: impl IntoIterator<Item = Entry<K, V>>,
        config: TableConfig,
        source: S,
    ) -> Wrr<K, V, S> {
        let mut table = Wrr {
            entries: SmallVec::new(),
            total_weight: 0,
            config,
            draws: source,
        };
        table.rebuild(entries.into_iter().collect());
        return table;
    }

    /// Replace the entire entry set.
    ///
    /// Always succeeds: normalization absorbs degenerate candidates by
    /// exclusion, and duplicate keys collapse to the last one given.
    pub fn set(&mut self, entries: impl IntoIterator<Item = Entry<K, V>>) -> bool {
        self.rebuild(entries.into_iter().collect());
        return true;
    }

    /// Add a new entry. Fails if an entry with the same key already exists.
    pub fn add(&mut self, entry: Entry<K, V>) -> bool {
        if self.contains_key(&entry.key) {
            return false;
        }
        let mut candidates = self.take_candidates();
        candidates.push(entry);
        self.rebuild(candidates);
        return true;
    }

    /// Overwrite the entry sharing the given entry's key. Fails if no entry
    /// has that key.
    pub fn replace(&mut self, entry: Entry<K, V>) -> bool {
        let Some(at) = self.entries.iter().position(|e| e.key == entry.key) else {
            return false;
        };
        let mut candidates = self.take_candidates();
        candidates[at] = entry;
        self.rebuild(candidates);
        return true;
    }

    /// Remove the entry with the given key. Fails if no entry has that key.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(at) = self.entries.iter().position(|e| e.key == *key) else {
            return false;
        };
        let mut candidates = self.take_candidates();
        candidates.remove(at);
        self.rebuild(candidates);
        return true;
    }

    /// Select one entry's value, with probability proportional to weight.
    ///
    /// Returns `None` on an empty table. Uses a linear scan below the
    /// configured threshold and binary search at or above it; the two
    /// strategies return identical results for identical draws.
    pub fn next(&mut self) -> Option<&V> {
        if self.total_weight == 0 {
            return None;
        }
        // Clamp so a scripted source handing back an out-of-range value
        // still resolves to the entry owning the top of the range space.
        let draw = self.draws.draw(self.total_weight).min(self.total_weight - 1);
        let found = if self.entries.len() < self.config.selection_threshold {
            select::linear(&self.entries, draw)
        } else {
            select::binary(&self.entries, draw)
        };
        return found.map(|entry| &entry.value);
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> u64 {
        return self.total_weight;
    }

    /// Whether an entry with the given key exists.
    pub fn contains_key(&self, key: &K) -> bool {
        return self.entries.iter().any(|e| e.key == *key);
    }

    /// The indexed entries, ascending by key with ascending `range_start`.
    pub fn entries(&self) -> &[Indexed<K, V>] {
        return &self.entries;
    }

    /// The configuration this table was built with.
    pub fn config(&self) -> &TableConfig {
        return &self.config;
    }

    /// Tear the indexed list back down into plain candidates for a rebuild.
    fn take_candidates(&mut self) -> Vec<Entry<K, V>> {
        return self
            .entries
            .drain(..)
            .map(|e| Entry::weighted(e.key, e.value, e.weight))
            .collect();
    }

    /// Rebuild the cumulative-range index from a candidate list.
    ///
    /// Normalizes weights, deduplicates by key (last write wins), sorts
    /// ascending by key, and assigns ranges cumulatively from 0. Cannot
    /// partially fail: degenerate candidates are excluded, and an
    /// all-excluded input yields an empty table.
    fn rebuild(&mut self, candidates: Vec<Entry<K, V>>) {
        let mut merged: FxHashMap<K, (V, u64)> = FxHashMap::default();
        for entry in candidates {
            let weight = if entry.weight == 0 {
                self.config.default_weight
            } else {
                entry.weight
            };
            // A zero default leaves the entry with an empty range that no
            // draw could land in; exclude it outright.
            if weight == 0 {
                continue;
            }
            merged.insert(entry.key, (entry.value, weight));
        }

        let mut flat: Vec<(K, V, u64)> = merged
            .into_iter()
            .map(|(key, (value, weight))| (key, value, weight))
            .collect();
        flat.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut entries = SmallVec::new();
        let mut total_weight = 0;
        for (key, value, weight) in flat {
            entries.push(Indexed {
                key,
                value,
                weight,
                range_start: total_weight,
            });
            total_weight += weight;
        }

        self.entries = entries;
        self.total_weight = total_weight;
    }
}

impl<K: Ord + Hash, V, S: DrawSource + Default> Default for Wrr<K, V, S> {
    fn default() -> Wrr<K, V, S> {
        return Wrr::with_source([], TableConfig::default(), S::default());
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for Wrr<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("Wrr")
            .field("entries", &self.entries)
            .field("total_weight", &self.total_weight)
            .field("config", &self.config)
            .finish();
    }
}
