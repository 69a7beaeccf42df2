//! Summary statistics: file count, directory count, total bytes
//!
//! A summary comes either from a finished eager enumeration, which is a
//! plain projection of its counters, or from folding a fresh streaming walk.

use serde::Serialize;

use crate::tree::{Enumeration, WalkEvent};

/// Aggregate figures for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total number of files
    pub files: usize,
    /// Total number of directories, root included
    pub directories: usize,
    /// Sum of all file sizes in bytes
    pub total_size: u64,
}

impl Summary {
    pub fn from_enumeration(enumeration: &Enumeration) -> Self {
        Self {
            files: enumeration.files,
            directories: enumeration.directories,
            total_size: enumeration.total_size,
        }
    }

    /// Fold a walk into a summary. Nothing is published until the walk ends.
    pub fn fold<I>(events: I) -> Self
    where
        I: IntoIterator<Item = WalkEvent>,
    {
        let mut collector = SummaryCollector::new();
        for event in events {
            match event {
                WalkEvent::Dir(_) => collector.record_directory(),
                WalkEvent::File(entry) => collector.record_file(entry.size),
            }
        }
        collector.finalize()
    }
}

/// Accumulates counts during traversal.
#[derive(Debug, Default)]
pub struct SummaryCollector {
    files: usize,
    directories: usize,
    total_size: u64,
}

impl SummaryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file in the statistics.
    pub fn record_file(&mut self, size: u64) {
        self.files += 1;
        self.total_size += size;
    }

    /// Record a directory in the statistics.
    pub fn record_directory(&mut self) {
        self.directories += 1;
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self) -> Summary {
        Summary {
            files: self.files,
            directories: self.directories,
            total_size: self.total_size,
        }
    }
}
