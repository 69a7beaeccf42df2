//! Diagnostic channel for subtrees that could not be listed.
//!
//! Each skipped subtree is reported exactly once. Files whose metadata cannot
//! be read are never reported here.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Write-only sink for recoverable subtree failures.
pub trait Diagnostics {
    fn subtree_skipped(&self, path: &Path, error: &io::Error);
}

/// Writes `warning: cannot access <path>: <error>` to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn subtree_skipped(&self, path: &Path, error: &io::Error) {
        // Nowhere left to report a failing stderr
        let _ = writeln!(
            io::stderr().lock(),
            "warning: cannot access {}: {}",
            path.display(),
            error
        );
    }
}

/// A subtree that was left out of the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSubtree {
    pub path: PathBuf,
    pub error: String,
}

/// Keeps every report in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Rc<RefCell<Vec<SkippedSubtree>>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<SkippedSubtree> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Diagnostics for DiagnosticLog {
    fn subtree_skipped(&self, path: &Path, error: &io::Error) {
        self.entries.borrow_mut().push(SkippedSubtree {
            path: path.to_path_buf(),
            error: error.to_string(),
        });
    }
}
