//! TreeWalker - enumerates the whole subtree into memory

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::platform::Platform;

use super::config::WalkerConfig;
use super::entry::FileEntry;
use super::traversal::{BaseTraversal, ItemOutcome};

/// Everything an eager walk found.
///
/// `total_size` always equals the sum of `sizes` and `files` its length.
/// `walk_order` holds the same paths as `sizes`, each once, in the order the
/// walk found them.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub directories: usize,
    pub files: usize,
    pub total_size: u64,
    pub sizes: HashMap<PathBuf, u64>,
    pub walk_order: Vec<PathBuf>,
}

impl Enumeration {
    fn record_directory(&mut self) {
        self.directories += 1;
    }

    fn record_file(&mut self, entry: FileEntry) {
        match self.sizes.insert(entry.path.clone(), entry.size) {
            Some(previous) => {
                self.total_size = self.total_size - previous + entry.size;
            }
            None => {
                self.files += 1;
                self.total_size += entry.size;
                self.walk_order.push(entry.path);
            }
        }
    }
}

/// Depth-first walker that materializes every file it finds.
/// For bounded memory use StreamingWalker instead.
pub struct TreeWalker<'a, P: Platform> {
    traversal: BaseTraversal<'a, P>,
}

impl<'a, P: Platform> TreeWalker<'a, P> {
    pub fn new(platform: &'a P, config: &WalkerConfig, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            traversal: BaseTraversal::new(platform, config, diagnostics),
        }
    }

    pub fn enumerate(&self, root: &Path) -> Enumeration {
        let mut out = Enumeration::default();
        self.walk_dir(root, 0, &mut out);
        debug!(
            root = %root.display(),
            directories = out.directories,
            files = out.files,
            total_size = out.total_size,
            "eager enumeration finished"
        );
        out
    }

    fn walk_dir(&self, path: &Path, depth: usize, out: &mut Enumeration) {
        let Some(listing) = self.traversal.open_dir(path) else {
            return;
        };
        out.record_directory();

        // Drain the listing first so only one handle is open at a time
        let children: Vec<_> = listing.collect();

        for item in children {
            match self.traversal.inspect(item, depth + 1) {
                ItemOutcome::Dir(child) => self.walk_dir(&child, depth + 1, out),
                ItemOutcome::File(entry) => out.record_file(entry),
                ItemOutcome::Skipped(_) => {}
            }
        }
    }
}
