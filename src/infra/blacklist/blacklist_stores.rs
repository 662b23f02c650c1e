// Implementations of the `BlacklistStore` port. The JSON variant mirrors
// the posts store: one file, rewritten on every mutation.

use crate::core::blacklist::{BlacklistItem, BlacklistStore};
use crate::core::board::StoreError;
use async_trait::async_trait;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryBlacklistStore {
    items: RwLock<Vec<BlacklistItem>>,
}

impl InMemoryBlacklistStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryBlacklistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlacklistStore for InMemoryBlacklistStore {
    async fn insert(&self, item: BlacklistItem) -> Result<(), StoreError> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<BlacklistItem>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() != before)
    }

    async fn is_listed(&self, value: &str) -> Result<bool, StoreError> {
        // Exact equality, expiry ignored (see core::blacklist).
        Ok(self.items.read().await.iter().any(|i| i.value == value))
    }
}

pub struct JsonBlacklistStore {
    path: PathBuf,
    cache: RwLock<Vec<BlacklistItem>>,
}

impl JsonBlacklistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache: Vec<BlacklistItem> = if path.exists() {
            let file = File::open(&path).expect("Failed to open blacklist JSON file");
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            Vec::new()
        };

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let cache = self.cache.read().await;
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &*cache)?;
        Ok(())
    }
}

#[async_trait]
impl BlacklistStore for JsonBlacklistStore {
    async fn insert(&self, item: BlacklistItem) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        cache.push(item);
        drop(cache);
        self.persist().await
    }

    async fn all(&self) -> Result<Vec<BlacklistItem>, StoreError> {
        Ok(self.cache.read().await.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut cache = self.cache.write().await;
        let before = cache.len();
        cache.retain(|i| i.id != id);
        let existed = cache.len() != before;
        drop(cache);
        if existed {
            self.persist().await?;
        }
        Ok(existed)
    }

    async fn is_listed(&self, value: &str) -> Result<bool, StoreError> {
        Ok(self.cache.read().await.iter().any(|i| i.value == value))
    }
}
