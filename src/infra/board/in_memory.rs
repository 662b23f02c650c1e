// In-memory implementation of `PostStore`.
//
// Backs the test suites and is handy for throwaway local runs. The
// collection is a Vec rather than a map because stored order is part of the
// contract: posts sit newest-first and feed ties fall back to that order.
// At a single city's volume the linear id lookups are irrelevant.

use crate::core::board::{Post, PostStore, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: Post) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        posts.insert(0, post);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.clone())
    }
}
