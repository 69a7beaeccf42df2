//! Directory tree walking logic
//!
//! This module provides the two traversal strategies:
//!
//! - `TreeWalker`: enumerates the whole subtree once into an [`Enumeration`]
//! - `StreamingWalker`: yields entries lazily, a fresh walk per call, O(depth) memory

mod config;
mod entry;
mod streaming;
mod traversal;
mod utils;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use entry::FileEntry;
pub(crate) use entry::serialize_path;
pub use streaming::{FileStream, StreamingWalker, WalkEvent, WalkEvents};
pub use traversal::{ItemOutcome, SkipReason};
pub use utils::format_size;
pub use walker::{Enumeration, TreeWalker};
