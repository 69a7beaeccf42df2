//! Test utilities: temporary directory trees and an in-memory platform.
//!
//! This module is only compiled for tests and benchmarks.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

use crate::platform::{DirChild, EntryKind, Platform};

/// A temporary directory tree for testing.
///
/// Files are filled with zero bytes so their sizes are exact.
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file of `size` bytes, creating parent directories as needed.
    pub fn add_file(&self, path: &str, size: usize) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, vec![0u8; size]).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct MemoryTree {
    /// Children in insertion order, so walks are deterministic.
    dirs: BTreeMap<PathBuf, Vec<PathBuf>>,
    files: BTreeMap<PathBuf, u64>,
    others: HashSet<PathBuf>,
    denied_listing: HashSet<PathBuf>,
    failing_metadata: HashSet<PathBuf>,
    broken_children: BTreeMap<PathBuf, usize>,
}

impl MemoryTree {
    fn ensure_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), Vec::new());
        if let Some(parent) = path.parent() {
            if parent != path && !parent.as_os_str().is_empty() {
                self.ensure_dir(parent);
                self.link(parent, path);
            }
        }
    }

    fn link(&mut self, parent: &Path, child: &Path) {
        if let Some(children) = self.dirs.get_mut(parent) {
            if !children.iter().any(|c| c == child) {
                children.push(child.to_path_buf());
            }
        }
    }

    fn add_leaf(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent);
            self.link(parent, path);
        }
    }

    fn kind_of(&self, path: &Path) -> Option<EntryKind> {
        if self.dirs.contains_key(path) {
            Some(EntryKind::Dir)
        } else if self.files.contains_key(path) {
            Some(EntryKind::File)
        } else if self.others.contains(path) {
            Some(EntryKind::Other)
        } else {
            None
        }
    }
}

/// In-memory [`Platform`] with injectable failures.
///
/// Clones share the same tree, so a test can keep a handle and change the
/// tree after handing the platform to an analyzer.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Rc<RefCell<MemoryTree>>,
    open: Rc<Cell<usize>>,
}

impl MemoryFs {
    /// Create a tree containing only the directory `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let fs = Self::default();
        fs.add_dir(root);
        fs
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.tree.borrow_mut().ensure_dir(path.as_ref());
    }

    pub fn add_file(&self, path: impl AsRef<Path>, size: u64) {
        let path = path.as_ref();
        let mut tree = self.tree.borrow_mut();
        tree.add_leaf(path);
        tree.files.insert(path.to_path_buf(), size);
    }

    /// Add something that is neither a file nor a directory.
    pub fn add_special(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut tree = self.tree.borrow_mut();
        tree.add_leaf(path);
        tree.others.insert(path.to_path_buf());
    }

    /// Make listing `path` fail with `PermissionDenied`.
    pub fn deny_listing(&self, path: impl AsRef<Path>) {
        self.tree
            .borrow_mut()
            .denied_listing
            .insert(path.as_ref().to_path_buf());
    }

    /// Make sizing `path` fail with `PermissionDenied`.
    pub fn fail_metadata(&self, path: impl AsRef<Path>) {
        self.tree
            .borrow_mut()
            .failing_metadata
            .insert(path.as_ref().to_path_buf());
    }

    /// Append a listing item to `dir` that yields an error instead of a child.
    pub fn add_broken_child(&self, dir: impl AsRef<Path>) {
        *self
            .tree
            .borrow_mut()
            .broken_children
            .entry(dir.as_ref().to_path_buf())
            .or_default() += 1;
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut tree = self.tree.borrow_mut();
        tree.files.remove(path);
        tree.others.remove(path);
        tree.dirs.remove(path);
        if let Some(children) = path.parent().and_then(|p| tree.dirs.get_mut(p)) {
            children.retain(|c| c != path);
        }
    }

    /// Listings opened and not yet dropped.
    pub fn open_listings(&self) -> usize {
        self.open.get()
    }
}

/// A listing handle that counts itself as open until dropped.
#[derive(Debug)]
pub struct MemoryListing {
    items: std::vec::IntoIter<io::Result<DirChild>>,
    open: Rc<Cell<usize>>,
}

impl Iterator for MemoryListing {
    type Item = io::Result<DirChild>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

impl Drop for MemoryListing {
    fn drop(&mut self) {
        self.open.set(self.open.get() - 1);
    }
}

impl Platform for MemoryFs {
    type Listing = MemoryListing;

    fn list_dir(&self, path: &Path) -> io::Result<MemoryListing> {
        let tree = self.tree.borrow();
        if tree.denied_listing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        let Some(children) = tree.dirs.get(path) else {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        };

        let mut items: Vec<io::Result<DirChild>> = children
            .iter()
            .filter_map(|child| tree.kind_of(child).map(|kind| Ok(DirChild::new(child, kind))))
            .collect();
        for _ in 0..tree.broken_children.get(path).copied().unwrap_or(0) {
            items.push(Err(io::Error::other("unreadable directory entry")));
        }

        self.open.set(self.open.get() + 1);
        Ok(MemoryListing {
            items: items.into_iter(),
            open: Rc::clone(&self.open),
        })
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        let tree = self.tree.borrow();
        if tree.failing_metadata.contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        tree.files
            .get(path)
            .copied()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        self.tree
            .borrow()
            .kind_of(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_creates_sized_files() {
        let tree = TestTree::new();
        let file = tree.add_file("sub/a.bin", 17);
        assert_eq!(fs::metadata(file).unwrap().len(), 17);
        assert!(tree.add_dir("empty").is_dir());
    }

    #[test]
    fn test_memory_fs_links_parents() {
        let mem = MemoryFs::new("/r");
        mem.add_file("/r/x/y/z.bin", 3);
        assert_eq!(mem.kind(Path::new("/r/x/y")).unwrap(), EntryKind::Dir);

        let children: Vec<DirChild> = mem
            .list_dir(Path::new("/r"))
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(children, vec![DirChild::new("/r/x", EntryKind::Dir)]);
        assert_eq!(mem.open_listings(), 0);
    }

    #[test]
    fn test_memory_fs_counts_open_listings() {
        let mem = MemoryFs::new("/r");
        let first = mem.list_dir(Path::new("/r")).unwrap();
        let second = mem.list_dir(Path::new("/r")).unwrap();
        assert_eq!(mem.open_listings(), 2);
        drop(first);
        drop(second);
        assert_eq!(mem.open_listings(), 0);
    }

    #[test]
    fn test_memory_fs_remove() {
        let mem = MemoryFs::new("/r");
        mem.add_file("/r/a.bin", 1);
        mem.remove("/r/a.bin");
        assert!(mem.kind(Path::new("/r/a.bin")).is_err());
        assert_eq!(mem.list_dir(Path::new("/r")).unwrap().count(), 0);
    }
}
