// Persistence port for the listing collection.
//
// The service only ever does per-record read-modify-write through this
// trait: fetch one post, apply a pure rule, save it back. Stores must keep
// insertion order (newest first) because feed ties fall back to it.

use super::board_models::Post;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Admit a new post at the front of the collection (most recent first).
    async fn insert(&self, post: Post) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Replace the stored post with the same id, keeping its position.
    /// Returns false when the post is no longer present.
    async fn save(&self, post: Post) -> Result<bool, StoreError>;

    /// Returns false when the post was already gone.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Snapshot of the whole collection in stored order.
    async fn all(&self) -> Result<Vec<Post>, StoreError>;
}
