//! Filesystem primitives consumed by the traversal engine
//!
//! The walkers never touch `std::fs` directly. They ask a [`Platform`] to list
//! a directory and to size a file, which keeps the failure policy testable
//! against an in-memory tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory child turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, devices, broken links and links to directories.
    Other,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirChild {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// The child's own name, used for ignore-pattern matching.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Directory-listing and metadata primitives.
///
/// A listing is an open handle: it is held by the streaming walker while the
/// subtree below it is walked and released when dropped.
pub trait Platform {
    type Listing: Iterator<Item = io::Result<DirChild>>;

    /// Open a lazy listing of the immediate children of `path`.
    fn list_dir(&self, path: &Path) -> io::Result<Self::Listing>;

    /// Size in bytes of the file at `path`.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Classify `path` without listing it.
    fn kind(&self, path: &Path) -> io::Result<EntryKind>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl Platform for StdFs {
    type Listing = StdListing;

    fn list_dir(&self, path: &Path) -> io::Result<StdListing> {
        fs::read_dir(path).map(|inner| StdListing { inner })
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        fs::metadata(path).map(|m| kind_of(&m.file_type()))
    }
}

/// Wraps [`fs::ReadDir`], classifying each entry as it is pulled.
#[derive(Debug)]
pub struct StdListing {
    inner: fs::ReadDir,
}

impl Iterator for StdListing {
    type Item = io::Result<DirChild>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e)),
        };
        let path = entry.path();
        let kind = match entry.file_type() {
            // Never descend through a link, but count links that land on a file
            Ok(ft) if ft.is_symlink() => match fs::metadata(&path) {
                Ok(m) if m.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            },
            Ok(ft) => kind_of(&ft),
            Err(e) => return Some(Err(e)),
        };
        Some(Ok(DirChild { path, kind }))
    }
}

fn kind_of(ft: &fs::FileType) -> EntryKind {
    if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_std_listing_classifies_children() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "abc").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut children: Vec<DirChild> = StdFs
            .list_dir(dir.path())
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        children.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, EntryKind::File);
        assert_eq!(children[0].name(), "a.txt");
        assert_eq!(children[1].kind, EntryKind::Dir);
        assert_eq!(StdFs.file_size(&children[0].path).unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_directories() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("target.bin"), [0u8; 8]).unwrap();
        symlink(dir.path().join("real"), dir.path().join("dirlink")).unwrap();
        symlink(dir.path().join("target.bin"), dir.path().join("filelink")).unwrap();
        symlink(dir.path().join("missing"), dir.path().join("broken")).unwrap();

        let kinds: Vec<(String, EntryKind)> = StdFs
            .list_dir(dir.path())
            .unwrap()
            .map(|c| c.unwrap())
            .map(|c| (c.name(), c.kind))
            .collect();

        assert!(kinds.contains(&("dirlink".to_string(), EntryKind::Other)));
        assert!(kinds.contains(&("filelink".to_string(), EntryKind::File)));
        assert!(kinds.contains(&("broken".to_string(), EntryKind::Other)));
        assert!(kinds.contains(&("real".to_string(), EntryKind::Dir)));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = StdFs.kind(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
