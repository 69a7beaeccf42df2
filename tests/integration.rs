//! Integration tests for diskuse


use std::collections::HashSet;

use assert_cmd::Command;
use diskuse::{Analyzer, DiagnosticLog, Error, FileEntry, Order, ScanMode, WalkerConfig};
use harness::{TestTree, run_diskuse, sample_tree};
use predicates::prelude::*;

fn sizes(entries: &[FileEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.size).collect()
}

// ============================================================================
// Library
// ============================================================================

#[test]
fn test_eager_scenario() {
    let tree = sample_tree();
    let analyzer = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();

    assert_eq!(analyzer.file_count(), 3);
    assert!(analyzer.dir_count() >= 2);
    assert_eq!(analyzer.total_size(), 60);
    assert_eq!(sizes(&analyzer.top(Some(2), Order::Largest)), vec![30, 20]);
    assert_eq!(sizes(&analyzer.top(Some(1), Order::Smallest)), vec![10]);
}

#[test]
fn test_eager_totals_match_map() {
    let tree = sample_tree();
    tree.add_file("sub/deeper/d.bin", 7);
    let analyzer = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();

    let sum: u64 = analyzer.file_sizes().values().sum();
    assert_eq!(sum, analyzer.total_size());
    assert_eq!(analyzer.file_sizes().len(), analyzer.file_count());
    assert_eq!(analyzer.file_size(tree.path().join("sub/deeper/d.bin")), 7);
}

#[test]
fn test_streaming_scenario() {
    let tree = sample_tree();
    let mut analyzer = Analyzer::new(tree.path(), ScanMode::Streaming).unwrap();

    assert_eq!(analyzer.file_count(), 0);
    assert_eq!(analyzer.dir_count(), 0);
    assert_eq!(analyzer.total_size(), 0);

    let summary = analyzer.summary();
    let eager = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();
    assert_eq!(summary.files, eager.file_count());
    assert_eq!(summary.directories, eager.dir_count());
    assert_eq!(summary.total_size, eager.total_size());
    assert_eq!(analyzer.total_size(), 60);

    assert_eq!(sizes(&analyzer.top(Some(2), Order::Largest)), vec![30, 20]);
    assert_eq!(sizes(&analyzer.top(Some(1), Order::Smallest)), vec![10]);
}

#[test]
fn test_streams_are_restartable() {
    let tree = sample_tree();
    tree.add_file("sub/d.bin", 5);
    let analyzer = Analyzer::new(tree.path(), ScanMode::Streaming).unwrap();

    let first: HashSet<FileEntry> = analyzer.files().collect();
    let second: HashSet<FileEntry> = analyzer.files().collect();
    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn test_files_stream_available_in_eager_mode() {
    let tree = sample_tree();
    let analyzer = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();

    let streamed: HashSet<FileEntry> = analyzer.files().collect();
    let stored: HashSet<FileEntry> = analyzer
        .file_sizes()
        .iter()
        .map(|(p, &s)| FileEntry::new(p.clone(), s))
        .collect();
    assert_eq!(streamed, stored);
}

#[test]
fn test_unknown_path_is_zero() {
    let tree = sample_tree();
    let analyzer = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();
    assert_eq!(analyzer.file_size(tree.path().join("nope.bin")), 0);
    assert_eq!(analyzer.file_size("/definitely/not/here"), 0);
}

#[test]
fn test_unbounded_top_is_full_sort() {
    let tree = sample_tree();
    let analyzer = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();
    assert_eq!(sizes(&analyzer.top(None, Order::Largest)), vec![30, 20, 10]);
    assert_eq!(sizes(&analyzer.top(None, Order::Smallest)), vec![10, 20, 30]);
    assert!(analyzer.top(Some(0), Order::Largest).is_empty());
    assert_eq!(analyzer.top(Some(100), Order::Largest).len(), 3);
}

#[test]
fn test_construction_errors() {
    let tree = sample_tree();

    let err = Analyzer::new(tree.path().join("missing"), ScanMode::Eager)
        .err()
        .unwrap();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().starts_with("Directory does not exist: "));

    let err = Analyzer::new(tree.path().join("a.bin"), ScanMode::Streaming)
        .err()
        .unwrap();
    assert!(matches!(err, Error::NotADirectory { .. }));
    assert!(err.to_string().starts_with("Path is not a directory: "));
}

#[test]
fn test_empty_directory() {
    let tree = TestTree::new();
    let analyzer = Analyzer::new(tree.path(), ScanMode::Eager).unwrap();
    assert_eq!(analyzer.file_count(), 0);
    assert_eq!(analyzer.dir_count(), 1);
    assert_eq!(analyzer.total_size(), 0);
    assert!(analyzer.top(Some(10), Order::Largest).is_empty());
}

#[test]
fn test_config_applies_to_both_modes() {
    let tree = sample_tree();
    tree.add_file("sub/skip.log", 1000);
    tree.add_file("sub/deep/far.bin", 500);
    let config = WalkerConfig::default()
        .with_ignore_patterns(vec!["*.log".to_string()])
        .with_max_depth(Some(1));

    let eager = Analyzer::builder(tree.path())
        .config(config.clone())
        .diagnostics(DiagnosticLog::new())
        .build()
        .unwrap();
    assert_eq!(eager.total_size(), 60);

    let mut streaming = Analyzer::builder(tree.path())
        .mode(ScanMode::Streaming)
        .config(config)
        .build()
        .unwrap();
    assert_eq!(streaming.summary().total_size, 60);
    assert_eq!(streaming.summary().directories, eager.dir_count());
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_text_report() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_diskuse(tree.path(), &["-n", "2"]);
    assert!(success, "diskuse should succeed");
    assert!(stdout.contains("Summary Report"), "{}", stdout);
    assert!(stdout.contains("Total Files:       3"), "{}", stdout);
    assert!(stdout.contains("Total Size:        60B"), "{}", stdout);
    assert!(stdout.contains("Top 2 largest files:"), "{}", stdout);
    assert!(stdout.contains("b.bin: 30B"), "{}", stdout);
    assert!(stdout.contains("c.bin: 20B"), "{}", stdout);
    assert!(!stdout.contains("a.bin"), "{}", stdout);
}

#[test]
fn test_cli_streaming_smallest() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_diskuse(tree.path(), &["--stream", "--smallest", "-n", "1"]);
    assert!(success);
    assert!(stdout.contains("Total Directories: 2"), "{}", stdout);
    assert!(stdout.contains("Top 1 smallest files:"), "{}", stdout);
    assert!(stdout.contains("a.bin: 10B"), "{}", stdout);
}

#[test]
fn test_cli_list_and_all_files() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_diskuse(tree.path(), &["--all-files", "--list"]);
    assert!(success);
    assert!(stdout.contains("All files, largest first:"), "{}", stdout);
    assert!(stdout.contains("Files:"), "{}", stdout);
    assert!(stdout.contains("a.bin"), "{}", stdout);
}

#[test]
fn test_cli_json() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_diskuse(tree.path(), &["--json", "-n", "2"]);
    assert!(success);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["mode"], "eager");
    assert_eq!(value["summary"]["files"], 3);
    assert_eq!(value["summary"]["total_size"], 60);
    assert_eq!(value["top"].as_array().unwrap().len(), 2);
    assert_eq!(value["top"][0]["size"], 30);
}

#[test]
fn test_cli_missing_path() {
    let tree = TestTree::new();
    Command::cargo_bin("diskuse")
        .unwrap()
        .arg(tree.path().join("missing"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("diskuse: Directory does not exist: "));
}

#[test]
fn test_cli_file_as_root() {
    let tree = sample_tree();
    Command::cargo_bin("diskuse")
        .unwrap()
        .arg(tree.path().join("a.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path is not a directory"));
}

#[test]
fn test_cli_defaults_to_current_dir() {
    let tree = sample_tree();
    Command::cargo_bin("diskuse")
        .unwrap()
        .current_dir(tree.path())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 10 largest files:"))
        .stdout(predicate::str::contains("Total Files:       3"));
}
