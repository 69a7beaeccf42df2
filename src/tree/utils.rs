//! Shared utility functions for tree walking

use glob::Pattern;

/// Compiled ignore patterns. Invalid globs still match by exact name.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<(String, Option<Pattern>)>,
}

impl IgnoreSet {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| (p.clone(), Pattern::new(p).ok()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check if an entry name matches any pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|(raw, compiled)| {
            raw == name || compiled.as_ref().is_some_and(|p| p.matches(name))
        })
    }
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1}T", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
