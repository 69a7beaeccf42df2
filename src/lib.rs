//! Diskuse - disk usage summaries and largest/smallest file reports

pub mod analyzer;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod platform;
pub mod select;
pub mod summary;
pub mod tree;
mod validate;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, ScanMode};
pub use diagnostics::{DiagnosticLog, Diagnostics, SkippedSubtree, StderrDiagnostics};
pub use error::{Error, Result};
pub use output::{OutputConfig, Report, ReportFormatter, print_json, print_report, write_json};
pub use platform::{DirChild, EntryKind, Platform, StdFs};
pub use select::{Order, TopN, select_top};
pub use summary::{Summary, SummaryCollector};
pub use tree::{FileEntry, FileStream, StreamingWalker, TreeWalker, WalkEvent, WalkerConfig, format_size};
pub use validate::validate_root;
