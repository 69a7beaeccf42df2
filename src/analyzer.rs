//! Analyzer - answers size, count and top-N queries for one root
//!
//! In eager mode the tree is enumerated exactly once, while the analyzer is
//! built. In streaming mode nothing is scanned up front: every query that
//! needs traversal data walks the tree again, so two queries can disagree if
//! the filesystem changes between them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{Diagnostics, StderrDiagnostics};
use crate::error::Result;
use crate::platform::{Platform, StdFs};
use crate::select::{Order, select_top};
use crate::summary::Summary;
use crate::tree::{FileEntry, FileStream, StreamingWalker, TreeWalker, WalkEvents, WalkerConfig};
use crate::validate::validate_root;

/// Traversal strategy chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Enumerate once at construction and keep every file's size.
    #[default]
    Eager,
    /// Keep nothing; walk on demand.
    Streaming,
}

/// Counters plus, in eager mode, the path to size map and the order the
/// walk found each path in.
///
/// Written only at the end of the eager enumeration or of a streaming
/// [`Analyzer::summary`] call.
#[derive(Debug, Default)]
struct AnalyzerState {
    counts: Summary,
    file_sizes: HashMap<PathBuf, u64>,
    walk_order: Vec<PathBuf>,
}

/// Builder for [`Analyzer`].
pub struct AnalyzerBuilder<P: Platform = StdFs> {
    root: PathBuf,
    mode: ScanMode,
    config: WalkerConfig,
    platform: P,
    diagnostics: Box<dyn Diagnostics>,
}

impl AnalyzerBuilder<StdFs> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: ScanMode::default(),
            config: WalkerConfig::default(),
            platform: StdFs,
            diagnostics: Box::new(StderrDiagnostics),
        }
    }
}

impl<P: Platform> AnalyzerBuilder<P> {
    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Where subtree failures are reported. Defaults to stderr.
    pub fn diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub fn platform<Q: Platform>(self, platform: Q) -> AnalyzerBuilder<Q> {
        AnalyzerBuilder {
            root: self.root,
            mode: self.mode,
            config: self.config,
            platform,
            diagnostics: self.diagnostics,
        }
    }

    /// Validate the root and, in eager mode, enumerate it.
    pub fn build(self) -> Result<Analyzer<P>> {
        validate_root(&self.platform, &self.root)?;

        let mut analyzer = Analyzer {
            root: self.root,
            mode: self.mode,
            config: self.config,
            platform: self.platform,
            diagnostics: self.diagnostics,
            state: AnalyzerState::default(),
        };

        if analyzer.mode == ScanMode::Eager {
            let enumeration = TreeWalker::new(
                &analyzer.platform,
                &analyzer.config,
                analyzer.diagnostics.as_ref(),
            )
            .enumerate(&analyzer.root);
            analyzer.state = AnalyzerState {
                counts: Summary::from_enumeration(&enumeration),
                file_sizes: enumeration.sizes,
                walk_order: enumeration.walk_order,
            };
        }

        debug!(root = %analyzer.root.display(), mode = ?analyzer.mode, "analyzer ready");
        Ok(analyzer)
    }
}

/// Disk usage queries over a validated root.
pub struct Analyzer<P: Platform = StdFs> {
    root: PathBuf,
    mode: ScanMode,
    config: WalkerConfig,
    platform: P,
    diagnostics: Box<dyn Diagnostics>,
    state: AnalyzerState,
}

impl Analyzer<StdFs> {
    /// Analyze `root` on the real filesystem with default settings.
    pub fn new(root: impl Into<PathBuf>, mode: ScanMode) -> Result<Self> {
        Self::builder(root).mode(mode).build()
    }

    pub fn builder(root: impl Into<PathBuf>) -> AnalyzerBuilder<StdFs> {
        AnalyzerBuilder::new(root)
    }
}

impl<P: Platform> Analyzer<P> {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Size recorded for `path`, or 0 when it is unknown.
    ///
    /// Only the eager map is consulted; in streaming mode this is always 0.
    pub fn file_size(&self, path: impl AsRef<Path>) -> u64 {
        self.state
            .file_sizes
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }

    pub fn total_size(&self) -> u64 {
        self.state.counts.total_size
    }

    pub fn file_count(&self) -> usize {
        self.state.counts.files
    }

    pub fn dir_count(&self) -> usize {
        self.state.counts.directories
    }

    /// Every file found by the eager enumeration. Empty in streaming mode.
    pub fn file_sizes(&self) -> &HashMap<PathBuf, u64> {
        &self.state.file_sizes
    }

    /// Stored files in the order the eager walk found them. Empty in
    /// streaming mode.
    pub fn stored_entries(&self) -> impl Iterator<Item = FileEntry> + '_ {
        self.state.walk_order.iter().filter_map(|path| {
            self.state
                .file_sizes
                .get(path)
                .map(|&size| FileEntry::new(path.clone(), size))
        })
    }

    /// A fresh streaming walk over the root, in either mode.
    pub fn files(&self) -> FileStream<'_, P> {
        self.streaming_walker().files(&self.root)
    }

    /// A fresh streaming walk that also reports each directory entered.
    pub fn events(&self) -> WalkEvents<'_, P> {
        self.streaming_walker().events(&self.root)
    }

    /// The `limit` largest or smallest files, most extreme first.
    ///
    /// `None` returns every file sorted. Eager mode selects from the stored
    /// entries in walk order; streaming mode selects from a new walk. Both
    /// keep the file found first when sizes tie at the cut-off.
    pub fn top(&self, limit: Option<usize>, order: Order) -> Vec<FileEntry> {
        match self.mode {
            ScanMode::Eager => select_top(self.stored_entries(), limit, order),
            ScanMode::Streaming => select_top(self.files(), limit, order),
        }
    }

    /// File count, directory count and total size.
    ///
    /// Eager mode returns the stored counters. Streaming mode scans the tree
    /// and stores the result, so later `total_size()`/`file_count()`/
    /// `dir_count()` calls reflect the latest scan.
    pub fn summary(&mut self) -> Summary {
        if self.mode == ScanMode::Streaming {
            let counts = Summary::fold(self.events());
            debug!(
                files = counts.files,
                directories = counts.directories,
                total_size = counts.total_size,
                "streaming aggregation finished"
            );
            self.state.counts = counts;
        }
        self.state.counts
    }

    fn streaming_walker(&self) -> StreamingWalker<'_, P> {
        StreamingWalker::new(&self.platform, &self.config, self.diagnostics.as_ref())
    }
}
