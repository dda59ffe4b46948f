use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;

/// Where uploaded profile images go. Implementations return the stored path
/// as it should appear in the `profile_image` column.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String>;
}

/// Writes uploads under a local directory, named by millisecond timestamp
/// plus a short random suffix so same-millisecond uploads cannot collide,
/// keeping the original file's extension.
#[derive(Clone)]
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn stored_name(original_name: &str) -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix: u16 = rand::random();
    match Path::new(original_name).extension() {
        Some(ext) => format!("{}-{:04x}.{}", millis, suffix, ext.to_string_lossy()),
        None => format!("{}-{:04x}", millis, suffix),
    }
}

#[async_trait]
impl ImageStore for DiskStore {
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .context("create upload directory")?;
        let path = self.dir.join(stored_name(original_name));
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload to {}", path.display()))?;
        Ok(path.to_string_lossy().into_owned())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    saved: std::sync::Mutex<Vec<(String, Bytes)>>,
}

impl MemoryStore {
    pub fn saved_paths(&self) -> Vec<String> {
        self.saved
            .lock()
            .expect("memory store lock")
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String> {
        let path = format!("img/{}", stored_name(original_name));
        self.saved
            .lock()
            .expect("memory store lock")
            .push((path.clone(), body));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> DiskStore {
        let dir = std::env::temp_dir().join(format!("userfind-test-{}", rand::random::<u32>()));
        DiskStore::new(dir)
    }

    #[tokio::test]
    async fn save_writes_file_and_keeps_extension() {
        let store = temp_store();
        let path = store
            .save("avatar.jpg", Bytes::from_static(b"jpegbytes"))
            .await
            .expect("save");
        assert!(path.ends_with(".jpg"), "unexpected path: {path}");
        let on_disk = tokio::fs::read(&path).await.expect("read back");
        assert_eq!(on_disk, b"jpegbytes");
    }

    #[tokio::test]
    async fn concurrent_saves_get_distinct_paths() {
        let store = temp_store();
        let (a, b) = tokio::join!(
            store.save("a.png", Bytes::from_static(b"a")),
            store.save("b.png", Bytes::from_static(b"b")),
        );
        let (a, b) = (a.expect("save a"), b.expect("save b"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn name_without_extension_is_accepted() {
        let store = temp_store();
        let path = store
            .save("blob", Bytes::from_static(b"data"))
            .await
            .expect("save");
        assert!(!path.ends_with('.'), "unexpected path: {path}");
    }
}
