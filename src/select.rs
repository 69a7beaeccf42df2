//! Bounded top-N selection over a stream of file entries
//!
//! [`TopN`] keeps at most `N` entries in a binary heap whose top is the
//! current eviction candidate, so memory stays O(N) however long the stream
//! is. An incoming entry only displaces the candidate when it is strictly
//! more extreme; on equal sizes the entry seen first is kept.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::tree::FileEntry;

/// Upper bound on the heap's up-front allocation; larger limits grow on demand.
const INITIAL_CAPACITY: usize = 1024;

/// Which end of the size range to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Largest,
    Smallest,
}

impl Order {
    /// `Less` when a size of `a` ranks ahead of a size of `b`.
    pub fn rank(self, a: u64, b: u64) -> Ordering {
        match self {
            Order::Largest => b.cmp(&a),
            Order::Smallest => a.cmp(&b),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Order::Largest => "largest",
            Order::Smallest => "smallest",
        }
    }
}

/// Heap slot. Orders by rank, then by arrival, so the heap's maximum is the
/// worst-ranked entry and among equals the one that arrived last.
#[derive(Debug)]
struct Slot {
    entry: FileEntry,
    seq: u64,
    order: Order,
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .rank(self.entry.size, other.entry.size)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

/// Incremental bounded selector.
#[derive(Debug)]
pub struct TopN {
    limit: usize,
    order: Order,
    seen: u64,
    heap: BinaryHeap<Slot>,
}

impl TopN {
    pub fn new(limit: usize, order: Order) -> Self {
        Self {
            limit,
            order,
            seen: 0,
            heap: BinaryHeap::with_capacity(limit.min(INITIAL_CAPACITY)),
        }
    }

    pub fn push(&mut self, entry: FileEntry) {
        let seq = self.seen;
        self.seen += 1;

        if self.limit == 0 {
            return;
        }
        if self.heap.len() < self.limit {
            self.heap.push(Slot {
                entry,
                seq,
                order: self.order,
            });
            return;
        }

        let displaces = self
            .heap
            .peek()
            .is_some_and(|worst| self.order.rank(entry.size, worst.entry.size) == Ordering::Less);
        if displaces {
            if let Some(mut worst) = self.heap.peek_mut() {
                *worst = Slot {
                    entry,
                    seq,
                    order: self.order,
                };
            }
        }
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Held entries, most extreme first. Equal sizes keep arrival order.
    pub fn into_sorted_vec(self) -> Vec<FileEntry> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|slot| slot.entry)
            .collect()
    }
}

/// Select the `limit` most extreme entries in `order`.
///
/// With `limit == None` every entry is collected and sorted; that is the only
/// path whose memory grows with the input.
pub fn select_top<I>(entries: I, limit: Option<usize>, order: Order) -> Vec<FileEntry>
where
    I: IntoIterator<Item = FileEntry>,
{
    match limit {
        Some(n) => {
            let mut top = TopN::new(n, order);
            for entry in entries {
                top.push(entry);
            }
            top.into_sorted_vec()
        }
        None => {
            let mut all: Vec<FileEntry> = entries.into_iter().collect();
            // Stable, so equal sizes stay in arrival order
            all.sort_by(|a, b| order.rank(a.size, b.size));
            all
        }
    }
}
