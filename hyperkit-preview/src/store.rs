//! In-memory project storage.
//!
//! Projects are written once and never mutated. Readers get an
//! `Arc<StoredProject>` snapshot, so an entry evicted by the sweeper while a
//! request is still reading it stays alive until that request drops it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub path: String,
    pub content: String,
}

impl ProjectFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A built project as kept by the store.
#[derive(Debug, Clone)]
pub struct StoredProject {
    /// Files in generation order. Duplicate paths are allowed; lookups take the first.
    pub files: Vec<ProjectFile>,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl StoredProject {
    pub fn new(files: Vec<ProjectFile>, timestamp: i64) -> Self {
        Self { files, timestamp }
    }

    /// First file whose path matches exactly.
    pub fn file(&self, path: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// Storage backend for built projects.
///
/// No operation fails; a missing key is `None`, not an error.
pub trait ProjectStore: Send + Sync {
    fn set(&self, id: &str, project: StoredProject);
    fn get(&self, id: &str) -> Option<Arc<StoredProject>>;
    /// Returns true if an entry was removed.
    fn delete(&self, id: &str) -> bool;
    /// Snapshot of every entry at the time of the call.
    fn entries(&self) -> Vec<(String, Arc<StoredProject>)>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    projects: Mutex<HashMap<String, Arc<StoredProject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn set(&self, id: &str, project: StoredProject) {
        self.projects.lock().insert(id.to_string(), Arc::new(project));
    }

    fn get(&self, id: &str) -> Option<Arc<StoredProject>> {
        self.projects.lock().get(id).cloned()
    }

    fn delete(&self, id: &str) -> bool {
        self.projects.lock().remove(id).is_some()
    }

    fn entries(&self) -> Vec<(String, Arc<StoredProject>)> {
        self.projects
            .lock()
            .iter()
            .map(|(id, p)| (id.clone(), Arc::clone(p)))
            .collect()
    }

    fn len(&self) -> usize {
        self.projects.lock().len()
    }
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Current time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// New project id: `project-{timestamp_ms}-{6 base-36 chars}`.
pub fn new_project_id(timestamp_ms: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("project-{timestamp_ms}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(paths: &[&str], timestamp: i64) -> StoredProject {
        StoredProject::new(
            paths.iter().map(|p| ProjectFile::new(*p, format!("content of {p}"))).collect(),
            timestamp,
        )
    }

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("project-0-abcdef").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn set_get_delete() {
        let store = MemoryStore::new();
        store.set("a", project(&["index.html"], 1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().timestamp, 1);

        assert!(store.delete("a"));
        assert!(!store.delete("a"));
        assert!(store.get("a").is_none());
    }

    #[test]
    fn snapshot_outlives_delete() {
        let store = MemoryStore::new();
        store.set("a", project(&["index.html"], 1));
        let snap = store.get("a").unwrap();
        store.delete("a");
        assert_eq!(snap.files[0].path, "index.html");
    }

    #[test]
    fn entries_lists_everything() {
        let store = MemoryStore::new();
        store.set("a", project(&[], 1));
        store.set("b", project(&[], 2));
        let mut ids: Vec<String> = store.entries().into_iter().map(|(id, _)| id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_paths_first_wins() {
        let p = StoredProject::new(
            vec![
                ProjectFile::new("index.html", "first"),
                ProjectFile::new("index.html", "second"),
            ],
            0,
        );
        assert_eq!(p.file("index.html").unwrap().content, "first");
    }

    #[test]
    fn project_id_format() {
        let id = new_project_id(1_700_000_000_000);
        let suffix = id.strip_prefix("project-1700000000000-").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn project_ids_differ() {
        let a = new_project_id(5);
        let b = new_project_id(5);
        assert_ne!(a, b);
    }
}
