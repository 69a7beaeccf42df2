//! StreamingWalker - yields entries lazily without building a map in memory
//!
//! Every call to [`StreamingWalker::files`] or [`StreamingWalker::events`]
//! starts a new walk from the root. A stream is never resumed: restarting
//! means walking again. Open directory listings live on the iterator's stack
//! and are released when it is dropped, whether or not it ran to the end.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::platform::Platform;

use super::config::WalkerConfig;
use super::entry::FileEntry;
use super::traversal::{BaseTraversal, ItemOutcome};

/// One step of a streaming walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// A directory was entered (its listing opened). The root comes first.
    Dir(PathBuf),
    File(FileEntry),
}

/// Factory for fresh, independent streaming walks.
pub struct StreamingWalker<'a, P: Platform> {
    platform: &'a P,
    config: &'a WalkerConfig,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, P: Platform> StreamingWalker<'a, P> {
    pub fn new(platform: &'a P, config: &'a WalkerConfig, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            platform,
            config,
            diagnostics,
        }
    }

    /// Start a new walk yielding directory and file events.
    pub fn events(&self, root: &Path) -> WalkEvents<'a, P> {
        WalkEvents {
            traversal: BaseTraversal::new(self.platform, self.config, self.diagnostics),
            pending_root: Some(root.to_path_buf()),
            stack: Vec::new(),
        }
    }

    /// Start a new walk yielding only files.
    pub fn files(&self, root: &Path) -> FileStream<'a, P> {
        FileStream {
            events: self.events(root),
        }
    }
}

/// Lazy depth-first walk. Nothing is listed until the first `next()`.
///
/// One listing stays open for every directory between the root and the
/// current position, so memory and open handles grow with the tree's depth,
/// not its size. On a tree deep enough to exhaust the process's file
/// descriptor limit, the directories past that limit fail to open and are
/// reported as skipped subtrees.
pub struct WalkEvents<'a, P: Platform> {
    traversal: BaseTraversal<'a, P>,
    pending_root: Option<PathBuf>,
    /// One open listing per directory on the current path from the root.
    stack: Vec<P::Listing>,
}

impl<P: Platform> WalkEvents<'_, P> {
    fn enter(&mut self, path: PathBuf) -> Option<WalkEvent> {
        let listing = self.traversal.open_dir(&path)?;
        self.stack.push(listing);
        Some(WalkEvent::Dir(path))
    }
}

impl<P: Platform> Iterator for WalkEvents<'_, P> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        if let Some(root) = self.pending_root.take() {
            debug!(root = %root.display(), "streaming walk started");
            return self.enter(root);
        }

        loop {
            // Children of the listing at stack index i sit at depth i + 1
            let depth = self.stack.len();
            let listing = self.stack.last_mut()?;
            let Some(item) = listing.next() else {
                self.stack.pop();
                continue;
            };

            match self.traversal.inspect(item, depth) {
                ItemOutcome::Dir(path) => {
                    if let Some(event) = self.enter(path) {
                        return Some(event);
                    }
                }
                ItemOutcome::File(entry) => return Some(WalkEvent::File(entry)),
                ItemOutcome::Skipped(_) => {}
            }
        }
    }
}

/// Lazy sequence of the files below a root.
pub struct FileStream<'a, P: Platform> {
    events: WalkEvents<'a, P>,
}

impl<P: Platform> Iterator for FileStream<'_, P> {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        self.events.by_ref().find_map(|event| match event {
            WalkEvent::File(entry) => Some(entry),
            WalkEvent::Dir(_) => None,
        })
    }
}
