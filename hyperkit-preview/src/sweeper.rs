//! Retention and capacity eviction for the project store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::store::{self, ProjectStore};

/// Default retention: one hour.
pub const DEFAULT_RETENTION_SECS: u64 = 60 * 60;

/// Remove every project older than `max_age_ms` at `now_ms`.
///
/// An entry exactly `max_age_ms` old survives. Returns the number removed.
pub fn sweep_expired(store: &dyn ProjectStore, now_ms: i64, max_age_ms: i64) -> usize {
    let mut removed = 0;
    for (id, project) in store.entries() {
        if now_ms - project.timestamp > max_age_ms && store.delete(&id) {
            tracing::debug!(project_id = %id, "Evicted expired project");
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::info!(removed, remaining = store.len(), "Swept expired projects");
    }
    removed
}

/// Evict the oldest projects until at most `max_projects` remain.
///
/// `keep` (the project just stored) is never evicted, whatever its timestamp.
/// `max_projects == 0` means unbounded. Ties on timestamp are broken by id.
pub fn enforce_capacity(store: &dyn ProjectStore, max_projects: usize, keep: &str) -> usize {
    if max_projects == 0 {
        return 0;
    }
    let entries = store.entries();
    if entries.len() <= max_projects {
        return 0;
    }
    let excess = entries.len() - max_projects;

    let mut candidates: Vec<_> = entries.into_iter().filter(|(id, _)| id != keep).collect();
    candidates.sort_by(|(a_id, a), (b_id, b)| {
        a.timestamp.cmp(&b.timestamp).then_with(|| a_id.cmp(b_id))
    });

    let mut removed = 0;
    for (id, _) in candidates.into_iter().take(excess) {
        if store.delete(&id) {
            tracing::debug!(project_id = %id, "Evicted project over capacity");
            removed += 1;
        }
    }
    removed
}

/// Spawn a task that sweeps the store every `interval`.
pub fn spawn(store: Arc<dyn ProjectStore>, interval: Duration, max_age_ms: i64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // skip first immediate tick
        loop {
            ticker.tick().await;
            sweep_expired(store.as_ref(), store::now_ms(), max_age_ms);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, ProjectFile, StoredProject};

    const HOUR_MS: i64 = 3_600_000;

    fn entry(timestamp: i64) -> StoredProject {
        StoredProject::new(vec![ProjectFile::new("index.html", "<html></html>")], timestamp)
    }

    #[test]
    fn sweep_boundary() {
        let store = MemoryStore::new();
        let now = 10_000_000;
        store.set("old", entry(now - 3_600_001));
        store.set("young", entry(now - 3_599_999));
        store.set("exact", entry(now - 3_600_000));

        let removed = sweep_expired(&store, now, HOUR_MS);
        assert_eq!(removed, 1);
        assert!(store.get("old").is_none());
        assert!(store.get("young").is_some());
        assert!(store.get("exact").is_some());
    }

    #[test]
    fn sweep_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(sweep_expired(&store, 0, HOUR_MS), 0);
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let store = MemoryStore::new();
        store.set("c", entry(300));
        store.set("a", entry(100));
        store.set("b", entry(200));

        store.set("d", entry(400));

        assert_eq!(enforce_capacity(&store, 2, "d"), 2);
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_none());
        assert!(store.get("c").is_some());
        assert!(store.get("d").is_some());
    }

    #[test]
    fn capacity_zero_is_unbounded() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.set(&format!("p{i}"), entry(i));
        }
        assert_eq!(enforce_capacity(&store, 0, "p4"), 0);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn capacity_ties_break_on_id() {
        let store = MemoryStore::new();
        store.set("b", entry(1));
        store.set("a", entry(1));
        store.set("new", entry(2));
        enforce_capacity(&store, 2, "new");
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
    }

    #[test]
    fn capacity_keeps_new_project_on_timestamp_tie() {
        let store = MemoryStore::new();
        store.set("project-5-zzzzzz", entry(5));
        store.set("project-5-aaaaaa", entry(5));

        assert_eq!(enforce_capacity(&store, 1, "project-5-aaaaaa"), 1);
        assert!(store.get("project-5-aaaaaa").is_some());
        assert!(store.get("project-5-zzzzzz").is_none());
    }

    #[test]
    fn capacity_keeps_new_project_behind_newer_entry() {
        let store = MemoryStore::new();
        store.set("skewed", entry(10_000));
        store.set("fresh", entry(0));

        assert_eq!(enforce_capacity(&store, 1, "fresh"), 1);
        assert!(store.get("fresh").is_some());
        assert!(store.get("skewed").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn background_sweep_runs_on_interval() {
        let store: Arc<dyn ProjectStore> = Arc::new(MemoryStore::new());
        store.set("stale", entry(0));
        let handle = spawn(Arc::clone(&store), Duration::from_secs(60), HOUR_MS);

        tokio::time::sleep(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        assert!(store.get("stale").is_none());
        handle.abort();
    }
}
