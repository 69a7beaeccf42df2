//! Report formatting and display
//!
//! - `config` - Output configuration types
//! - `report` - Colored text report
//! - `json` - JSON output

mod config;
mod json;
mod report;

use std::path::PathBuf;

use serde::Serialize;

use crate::analyzer::{Analyzer, ScanMode};
use crate::platform::Platform;
use crate::select::Order;
use crate::summary::Summary;
use crate::tree::FileEntry;

pub use config::OutputConfig;
pub use json::{print_json, write_json};
pub use report::{ReportFormatter, print_report};

/// Everything the front-end shows for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(serialize_with = "crate::tree::serialize_path")]
    pub root: PathBuf,
    pub mode: ScanMode,
    pub summary: Summary,
    pub order: Order,
    /// `None` when every file was ranked
    pub limit: Option<usize>,
    pub top: Vec<FileEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
}

impl Report {
    /// Run the queries a report needs.
    ///
    /// In streaming mode each part is its own walk: one for the summary, one
    /// for the ranking, and one more for the listing.
    pub fn collect<P: Platform>(
        analyzer: &mut Analyzer<P>,
        limit: Option<usize>,
        order: Order,
        list_files: bool,
    ) -> Self {
        let summary = analyzer.summary();
        let top = analyzer.top(limit, order);
        let files = list_files.then(|| {
            let mut files: Vec<FileEntry> = match analyzer.mode() {
                ScanMode::Eager => analyzer.stored_entries().collect(),
                ScanMode::Streaming => analyzer.files().collect(),
            };
            files.sort_by(|a, b| a.path.cmp(&b.path));
            files
        });

        Self {
            root: analyzer.root().to_path_buf(),
            mode: analyzer.mode(),
            summary,
            order,
            limit,
            top,
            files,
        }
    }
}
