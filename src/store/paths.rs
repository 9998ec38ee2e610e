//! Mapping between indexed file paths and shard files

use std::path::{Component, Path, PathBuf};

/// Index directory under the project root
pub const CODEMAP_DIR: &str = ".codemap";
/// Manifest and per-directory shard file name
pub const MAP_FILE: &str = ".codemap.json";
/// Shard for files directly at the project root
pub const ROOT_SHARD_FILE: &str = "_root.codemap.json";

/// Root-relative path in the form the index keys on: forward slashes, no `./`
pub fn normalize_rel_path(path: &str) -> String {
    let unix = path.replace('\\', "/");
    unix.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a normalized key names a file inside the root
pub fn is_contained(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('/') && key.split('/').all(|part| part != "..")
}

/// Splits `src/core/a.py` into (`src/core`, `a.py`); root files get an empty directory
pub fn split_rel_path(path: &str) -> (String, String) {
    let normalized = normalize_rel_path(path);
    match normalized.rsplit_once('/') {
        Some((dir, file)) => (dir.to_string(), file.to_string()),
        None => (String::new(), normalized),
    }
}

pub fn join_rel_path(directory: &str, file_name: &str) -> String {
    if directory.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", directory, file_name)
    }
}

pub fn manifest_path(codemap_dir: &Path) -> PathBuf {
    codemap_dir.join(MAP_FILE)
}

pub fn shard_path(codemap_dir: &Path, directory: &str) -> PathBuf {
    if directory.is_empty() {
        return codemap_dir.join(ROOT_SHARD_FILE);
    }
    let mut path = codemap_dir.to_path_buf();
    path.extend(directory.split('/'));
    path.join(MAP_FILE)
}

/// Converts an absolute or relative file path to the index key under `root`
///
/// `..` is resolved lexically; `None` when the result leaves the root.
pub fn relative_to_root(root: &Path, path: &Path) -> Option<String> {
    let relative = if path.is_absolute() {
        path.strip_prefix(root).ok()?
    } else {
        path
    };

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    let key = normalize_rel_path(&parts.join("/"));
    is_contained(&key).then_some(key)
}
