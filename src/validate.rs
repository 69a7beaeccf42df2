//! Root validation, run before any traversal.

use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::platform::{EntryKind, Platform};

/// Check that `root` exists, is a directory, and can be listed.
///
/// The listing probe reads at most one child and drops the handle.
pub fn validate_root<P: Platform>(platform: &P, root: &Path) -> Result<()> {
    let kind = match platform.kind(root) {
        Ok(kind) => kind,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(Error::AccessDenied {
                path: root.to_path_buf(),
                source: e,
            });
        }
        Err(_) => {
            return Err(Error::NotFound {
                path: root.to_path_buf(),
            });
        }
    };

    if kind != EntryKind::Dir {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let probe = platform
        .list_dir(root)
        .and_then(|mut listing| listing.next().transpose().map(|_| ()));
    probe.map_err(|source| Error::AccessDenied {
        path: root.to_path_buf(),
        source,
    })
}
