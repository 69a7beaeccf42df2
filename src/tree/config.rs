//! Configuration types for tree walkers

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Glob patterns matched against entry names. Matching files are
    /// skipped, matching directories are not entered.
    pub ignore_patterns: Vec<String>,
    /// Deepest directory level to enter. The root is level 0.
    pub max_depth: Option<usize>,
}

impl WalkerConfig {
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
