//! Folder polling.

use csv_overlay::viz::DiagnosticLog;
use csv_overlay::watcher::{list_files, FolderWatcher, WatchError};
use std::fs;
use std::time::{Duration, Instant};

#[test]
fn lists_visible_files_sorted() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("b.csv"), "x\n1\n").expect("write b");
    fs::write(dir.path().join("a.csv"), "x\n1\n").expect("write a");
    fs::write(dir.path().join(".hidden.csv"), "x\n1\n").expect("write hidden");
    fs::create_dir(dir.path().join("nested")).expect("create nested");

    let files: Vec<String> = list_files(dir.path()).expect("list").into_iter().collect();
    assert_eq!(files, vec!["a.csv", "b.csv"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = list_files(&dir.path().join("gone")).unwrap_err();
    assert!(matches!(err, WatchError::DirectoryNotFound { .. }));
}

#[test]
fn polls_once_per_interval() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("a.csv"), "x\n1\n").expect("write a");

    let mut watcher = FolderWatcher::new(dir.path(), Duration::from_secs(2));
    let mut log = DiagnosticLog::new();
    let start = Instant::now();

    let first = watcher.poll(start, &mut log).expect("first poll runs");
    assert!(first.contains("a.csv"));
    assert!(watcher.poll(start + Duration::from_millis(500), &mut log).is_none());

    fs::write(dir.path().join("b.csv"), "x\n1\n").expect("write b");
    let later = watcher
        .poll(start + Duration::from_secs(2), &mut log)
        .expect("due again");
    assert_eq!(later.len(), 2);
    assert!(log.is_empty());
}

#[test]
fn repeated_failures_are_logged_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut watcher = FolderWatcher::new(dir.path().join("gone"), Duration::from_millis(100));
    let mut log = DiagnosticLog::new();
    let start = Instant::now();

    for i in 0..3 {
        let files = watcher
            .poll(start + Duration::from_millis(100 * i), &mut log)
            .expect("poll due");
        assert!(files.is_empty());
    }
    assert_eq!(log.len(), 1);

    fs::create_dir(dir.path().join("gone")).expect("create dir");
    watcher.poll(start + Duration::from_secs(1), &mut log);
    fs::remove_dir(dir.path().join("gone")).expect("remove dir");
    watcher.poll(start + Duration::from_secs(2), &mut log);
    assert_eq!(log.len(), 2);
}
