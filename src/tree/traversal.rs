//! Common traversal logic shared by TreeWalker and StreamingWalker.
//!
//! Both walkers open directories and inspect their children through
//! [`BaseTraversal`], so the failure policy is written once: a child that
//! cannot be sized becomes [`ItemOutcome::Skipped`], and a directory that
//! cannot be listed is reported to the diagnostic channel and left out.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::diagnostics::Diagnostics;
use crate::platform::{DirChild, EntryKind, Platform};

use super::config::WalkerConfig;
use super::entry::FileEntry;
use super::utils::IgnoreSet;

/// Why a single child was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The listing item or the file's metadata could not be read.
    Unreadable(io::ErrorKind),
    /// Name matched an ignore pattern.
    Ignored,
    /// Neither a regular file nor a directory.
    Special,
    /// Directory below `max_depth`.
    TooDeep,
}

/// Result of inspecting one listing item.
#[derive(Debug)]
pub enum ItemOutcome {
    Dir(PathBuf),
    File(FileEntry),
    Skipped(SkipReason),
}

/// Common base traversal functionality shared by both walker implementations.
pub struct BaseTraversal<'a, P: Platform> {
    platform: &'a P,
    max_depth: Option<usize>,
    ignore: IgnoreSet,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, P: Platform> BaseTraversal<'a, P> {
    pub fn new(platform: &'a P, config: &WalkerConfig, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            platform,
            max_depth: config.max_depth,
            ignore: IgnoreSet::new(&config.ignore_patterns),
            diagnostics,
        }
    }

    /// Open a directory listing, reporting the subtree if it cannot be listed.
    pub fn open_dir(&self, path: &Path) -> Option<P::Listing> {
        match self.platform.list_dir(path) {
            Ok(listing) => Some(listing),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable subtree");
                self.diagnostics.subtree_skipped(path, &e);
                None
            }
        }
    }

    /// Inspect a child found at `depth` (children of the root are depth 1).
    pub fn inspect(&self, item: io::Result<DirChild>, depth: usize) -> ItemOutcome {
        let outcome = match item {
            Ok(child) => self.inspect_child(child, depth),
            Err(e) => ItemOutcome::Skipped(SkipReason::Unreadable(e.kind())),
        };
        if let ItemOutcome::Skipped(reason) = &outcome {
            trace!(?reason, depth, "skipped entry");
        }
        outcome
    }

    fn inspect_child(&self, child: DirChild, depth: usize) -> ItemOutcome {
        if !self.ignore.is_empty() && self.ignore.matches(&child.name()) {
            return ItemOutcome::Skipped(SkipReason::Ignored);
        }

        match child.kind {
            EntryKind::Dir if self.beyond_max_depth(depth) => ItemOutcome::Skipped(SkipReason::TooDeep),
            EntryKind::Dir => ItemOutcome::Dir(child.path),
            EntryKind::File => match self.platform.file_size(&child.path) {
                Ok(size) => ItemOutcome::File(FileEntry::new(child.path, size)),
                Err(e) => ItemOutcome::Skipped(SkipReason::Unreadable(e.kind())),
            },
            EntryKind::Other => ItemOutcome::Skipped(SkipReason::Special),
        }
    }

    /// Check if a directory at `depth` lies beyond the configured limit
    fn beyond_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}
