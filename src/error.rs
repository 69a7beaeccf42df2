//! Errors raised while constructing an analyzer.
//!
//! Only root validation can fail. Once an [`Analyzer`](crate::Analyzer)
//! exists, traversal problems are recovered per file or per subtree and
//! never surface as an `Error`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Directory does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Cannot access directory: {}: {source}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The path that failed validation.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::NotFound { path }
            | Error::NotADirectory { path }
            | Error::AccessDenied { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
