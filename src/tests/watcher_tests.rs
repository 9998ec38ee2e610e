//! Live watch sessions against a temp project

use super::helpers::{SAMPLE_PY, project, write_file};
use crate::config::CodemapConfig;
use crate::indexer::{Indexer, UpdateOutcome};
use crate::store::IndexStore;
use crate::watcher::{ChangeKind, WatchSession};
use std::fs;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(10);

type Seen = (String, ChangeKind, Option<UpdateOutcome>);

fn start_session(dir: &std::path::Path) -> (WatchSession, Receiver<Seen>) {
    let mut indexer = Indexer::new(dir, CodemapConfig::default()).unwrap();
    indexer.index_all().unwrap();
    indexer.set_debounce_ms(100);

    let (tx, rx) = mpsc::channel();
    let session = WatchSession::start(indexer, move |change, result| {
        let name = change
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _ = tx.send((name, change.kind, result.as_ref().ok().cloned()));
    })
    .unwrap();
    (session, rx)
}

/// First update for `name` whose outcome satisfies `pred`
fn wait_for(rx: &Receiver<Seen>, name: &str, pred: impl Fn(&UpdateOutcome) -> bool) -> Option<Seen> {
    let deadline = Instant::now() + WAIT;
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok(seen) if seen.0 == name && seen.2.as_ref().is_some_and(&pred) => return Some(seen),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
    None
}

#[test]
#[serial_test::serial] // inotify delivery is timing sensitive under load
fn test_new_file_is_indexed_while_watching() {
    let dir = project("watch_new", &[("keep.py", "def keep():\n    pass\n")]);
    let (session, rx) = start_session(dir.path());

    write_file(dir.path(), "fresh.py", SAMPLE_PY);

    // An early event can catch the file before its content lands
    let seen = wait_for(&rx, "fresh.py", |o| {
        matches!(o, UpdateOutcome::Indexed { symbols: 4, .. })
    })
    .expect("no update for the new file");
    assert_eq!(
        seen.2,
        Some(UpdateOutcome::Indexed {
            symbols: 4,
            symbols_changed: 4,
            syntax_warning: None,
        })
    );
    assert!(session.stop());

    // The update was persisted for other readers
    let mut store = IndexStore::load(dir.path()).unwrap();
    assert_eq!(store.get("fresh.py").map(|e| e.symbol_count()), Some(4));
    assert_eq!(store.stats().total_files, 2);
}

#[test]
#[serial_test::serial] // inotify delivery is timing sensitive under load
fn test_deleted_file_is_removed_while_watching() {
    let dir = project("watch_delete", &[("gone.py", SAMPLE_PY), ("keep.py", SAMPLE_PY)]);
    let (session, rx) = start_session(dir.path());

    fs::remove_file(dir.path().join("gone.py")).unwrap();

    let seen = wait_for(&rx, "gone.py", |o| {
        *o == UpdateOutcome::Removed { was_indexed: true }
    })
    .expect("no removal for the deleted file");
    assert_eq!(seen.1, ChangeKind::Deleted);
    assert!(session.stop());

    let mut store = IndexStore::load(dir.path()).unwrap();
    assert!(store.get("gone.py").is_none());
    assert!(store.get("keep.py").is_some());
}

#[test]
#[serial_test::serial] // inotify delivery is timing sensitive under load
fn test_ignored_paths_never_reach_the_indexer() {
    let dir = project("watch_ignore", &[("keep.py", "def keep():\n    pass\n")]);
    let (session, rx) = start_session(dir.path());

    write_file(dir.path(), "node_modules/dep/index.js", "function dep() {}\n");
    write_file(dir.path(), "notes.txt", "not source\n");
    // A watched file written last; once it shows up the others had their chance
    write_file(dir.path(), "marker.py", "def marker():\n    pass\n");

    let mut names = Vec::new();
    let deadline = Instant::now() + WAIT;
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok((name, ..)) => {
                let done = name == "marker.py";
                names.push(name);
                if done {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    assert!(session.stop());

    assert!(names.contains(&"marker.py".to_string()));
    assert!(!names.iter().any(|n| n == "index.js" || n == "notes.txt"));
}

#[test]
#[serial_test::serial] // inotify delivery is timing sensitive under load
fn test_stop_is_prompt_with_nothing_pending() {
    let dir = project("watch_stop", &[("a.py", "def a():\n    pass\n")]);
    let (session, _rx) = start_session(dir.path());

    assert_eq!(session.pending_count(), 0);
    let started = Instant::now();
    assert!(session.stop());
    assert!(started.elapsed() < Duration::from_secs(5));
}
