use crate::{Error, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Index entry for one stored artifact. Bytes live on disk; the record is
/// created on write and destroyed on eviction, never mutated in place.
#[derive(Debug, Clone)]
struct ArtifactRecord {
    mime_type: String,
    created_at: DateTime<Utc>,
}

/// Disk-backed cache of generated artifacts with TTL eviction.
///
/// Ids are UUIDv4, so they are collision-resistant under concurrent writes
/// and not enumerable. The index is a per-id concurrent map; a sweep never
/// blocks `put`/`get` of unrelated ids.
pub struct ArtifactStore {
    dir: PathBuf,
    ttl: Duration,
    index: DashMap<String, ArtifactRecord>,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf, ttl: Duration) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        tracing::info!("Artifact store at {} (ttl {:?})", dir.display(), ttl);

        Ok(Self {
            dir,
            ttl,
            index: DashMap::new(),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(id)
    }

    /// Store bytes under a fresh id and return it.
    ///
    /// The write goes to a temp file first and is renamed into place, so a
    /// concurrent `get` either sees the whole artifact or `NotFound`, never
    /// a partial write.
    pub async fn put(&self, bytes: &[u8], mime_type: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let final_path = self.path_for(&id);
        let tmp_path = self.dir.join(format!("{}.tmp", id));

        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &final_path).await?;

        self.index.insert(
            id.clone(),
            ArtifactRecord {
                mime_type: mime_type.to_string(),
                created_at: Utc::now(),
            },
        );

        tracing::debug!("Stored artifact {} ({} bytes)", id, bytes.len());
        Ok(id)
    }

    /// Read an artifact back as `(bytes, mime_type)`.
    pub async fn get(&self, id: &str) -> Result<(Vec<u8>, String)> {
        let mime_type = self
            .index
            .get(id)
            .map(|record| record.mime_type.clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let bytes = tokio::fs::read(self.path_for(id))
            .await
            .map_err(|_| Error::NotFound(id.to_string()))?;

        Ok((bytes, mime_type))
    }

    fn expired_ids(&self, now: DateTime<Utc>) -> Vec<String> {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        self.index
            .iter()
            .filter(|entry| now - entry.value().created_at > ttl)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Evict every artifact older than the TTL. Idempotent; safe to run
    /// concurrently with `put`/`get` of unrelated ids.
    pub async fn sweep(&self) -> usize {
        let expired = self.expired_ids(Utc::now());
        let mut removed = 0;

        for id in expired {
            if self.index.remove(&id).is_some() {
                if let Err(e) = tokio::fs::remove_file(self.path_for(&id)).await {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!("Failed to delete expired artifact {}: {}", id, e);
                    }
                }
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!("Swept {} expired artifact(s)", removed);
        }
        removed
    }

    /// Delete every artifact unconditionally. Administrative recovery only;
    /// the HTTP layer gates this behind a token check.
    pub async fn clear_all(&self) -> usize {
        let ids: Vec<String> = self.index.iter().map(|e| e.key().clone()).collect();
        let mut removed = 0;

        for id in ids {
            if self.index.remove(&id).is_some() {
                let _ = tokio::fs::remove_file(self.path_for(&id)).await;
                removed += 1;
            }
        }

        tracing::info!("Cleared {} artifact(s)", removed);
        removed
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Backdate an artifact's creation time, for expiry tests.
    #[cfg(test)]
    pub(crate) fn backdate(&self, id: &str, age: Duration) {
        if let Some(mut record) = self.index.get_mut(id) {
            record.created_at = Utc::now()
                - chrono::Duration::from_std(age).expect("test age fits chrono range");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HOUR: Duration = Duration::from_secs(3600);

    fn make_store(dir: &tempfile::TempDir) -> ArtifactStore {
        ArtifactStore::new(dir.path().join("artifacts"), HOUR).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips_bytes() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        let id = store.put(&[0x89, 0x50, 0x4E, 0x47], "image/png").await.unwrap();
        let (bytes, mime) = store.get(&id).await.unwrap();

        assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(mime, "image/png");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        let err = store.get("no-such-id").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ids_are_unique_across_writes() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        let a = store.put(&[1], "image/png").await.unwrap();
        let b = store.put(&[2], "image/png").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_sweep_evicts_expired_and_reclaims_disk() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        let old = store.put(&[1, 2, 3], "image/png").await.unwrap();
        let fresh = store.put(&[4, 5, 6], "image/png").await.unwrap();
        store.backdate(&old, HOUR + Duration::from_secs(1));

        let removed = store.sweep().await;
        assert_eq!(removed, 1);

        assert!(matches!(store.get(&old).await, Err(Error::NotFound(_))));
        assert!(!store.path_for(&old).exists());
        assert!(store.get(&fresh).await.is_ok());
    }

    #[tokio::test]
    async fn test_sweep_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        let id = store.put(&[1], "image/png").await.unwrap();
        store.backdate(&id, HOUR + Duration::from_secs(1));

        assert_eq!(store.sweep().await, 1);
        assert_eq!(store.sweep().await, 0);
    }

    #[tokio::test]
    async fn test_artifact_at_exact_ttl_survives_sweep() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        // Eviction requires strictly older than TTL.
        let id = store.put(&[1], "image/png").await.unwrap();
        store.backdate(&id, HOUR - Duration::from_secs(5));

        assert_eq!(store.sweep().await, 0);
        assert!(store.get(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_all_removes_everything() {
        let dir = tempdir().unwrap();
        let store = make_store(&dir);

        store.put(&[1], "image/png").await.unwrap();
        store.put(&[2], "audio/wav").await.unwrap();

        assert_eq!(store.clear_all().await, 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_puts_do_not_collide() {
        let dir = tempdir().unwrap();
        let store = std::sync::Arc::new(make_store(&dir));

        let mut handles = Vec::new();
        for i in 0u8..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(&[i], "image/png").await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(store.len(), 16);
    }
}
