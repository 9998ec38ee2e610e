//! Shared fixtures for the root crate's tests

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tempfile::TempDir;

static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Uniquely named temp directory so parallel tests never share a project
pub fn unique_temp_dir(test_name: &str) -> TempDir {
    let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    tempfile::Builder::new()
        .prefix(&format!("codemap_test_{}_{}", test_name, counter))
        .tempdir()
        .expect("Failed to create unique temp directory")
}

pub fn write_file(root: &Path, rel_path: &str, content: &str) {
    let path = root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Temp project populated with `files` (root-relative path, content)
pub fn project(test_name: &str, files: &[(&str, &str)]) -> TempDir {
    let dir = unique_temp_dir(test_name);
    for (rel_path, content) in files {
        write_file(dir.path(), rel_path, content);
    }
    dir
}

/// One function and one class with two methods: four symbols
pub const SAMPLE_PY: &str = r#"def top_level(x):
    """Module level helper."""
    return x


class UserService:
    """Looks up users."""

    def get_user(self, user_id):
        return user_id

    def save(self, user):
        pass
"#;
