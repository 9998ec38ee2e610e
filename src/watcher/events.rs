//! Conversion of raw notify events into per-file changes

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Changes described by one notify event; renames become delete + create
pub fn classify_event(event: &Event) -> Vec<FileChange> {
    let all = |kind: ChangeKind| -> Vec<FileChange> {
        event
            .paths
            .iter()
            .map(|p| FileChange::new(p.clone(), kind))
            .collect()
    };

    match &event.kind {
        EventKind::Create(_) => all(ChangeKind::Created),
        EventKind::Remove(_) => all(ChangeKind::Deleted),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut changes = Vec::new();
            if let Some(from) = event.paths.first() {
                changes.push(FileChange::new(from.clone(), ChangeKind::Deleted));
            }
            if let Some(to) = event.paths.get(1) {
                changes.push(FileChange::new(to.clone(), ChangeKind::Created));
            }
            changes
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => all(ChangeKind::Deleted),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => all(ChangeKind::Created),
        EventKind::Modify(_) => all(ChangeKind::Modified),
        other => {
            debug!("Ignoring event kind: {:?}", other);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, RemoveKind};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |e, p| e.add_path(PathBuf::from(p)))
    }

    #[test]
    fn test_create_modify_remove() {
        let created = classify_event(&event(EventKind::Create(CreateKind::File), &["/p/a.py"]));
        assert_eq!(created, vec![FileChange::new("/p/a.py", ChangeKind::Created)]);

        let modified = classify_event(&event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/p/a.py"],
        ));
        assert_eq!(modified[0].kind, ChangeKind::Modified);

        let removed = classify_event(&event(EventKind::Remove(RemoveKind::File), &["/p/a.py"]));
        assert_eq!(removed[0].kind, ChangeKind::Deleted);
    }

    #[test]
    fn test_rename_both_splits_into_delete_and_create() {
        let changes = classify_event(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/p/old.py", "/p/new.py"],
        ));
        assert_eq!(
            changes,
            vec![
                FileChange::new("/p/old.py", ChangeKind::Deleted),
                FileChange::new("/p/new.py", ChangeKind::Created),
            ]
        );
    }

    #[test]
    fn test_access_events_ignored() {
        let changes = classify_event(&event(
            EventKind::Access(AccessKind::Read),
            &["/p/a.py"],
        ));
        assert!(changes.is_empty());
    }
}
