// JSON-file-backed `PostStore`.
//
// The whole collection lives in one JSON array and is re-serialized after
// every mutation. Single-blob persistence is fine at one city's data
// volume; anything bigger wants per-record storage. A corrupt or missing
// file starts the portal empty rather than refusing to boot.

use crate::core::board::{Post, PostStore, StoreError};
use async_trait::async_trait;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct JsonPostStore {
    path: PathBuf,
    cache: RwLock<Vec<Post>>,
}

impl JsonPostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache: Vec<Post> = if path.exists() {
            let file = File::open(&path).expect("Failed to open posts JSON file");
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
impl PostStore for JsonPostStore {
    async fn insert(&self, post: Post) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        cache.insert(0, post);
        drop(cache); // Release lock before persisting
        self.persist().await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<bool, StoreError> {
        let mut cache = self.cache.write().await;
        let Some(slot) = cache.iter_mut().find(|p| p.id == post.id) else {
            return Ok(false);
        };
        *slot = post;
        drop(cache);
        self.persist().await?;
        Ok(true)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut cache = self.cache.write().await;
        let before = cache.len();
        cache.retain(|p| p.id != id);
        let existed = cache.len() != before;
        drop(cache);
        if existed {
            self.persist().await?;
        }
        Ok(existed)
    }

    async fn all(&self) -> Result<Vec<Post>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::{Bilingual, Comment, Contact, ListingDetails, PostStatus};
    use chrono::Utc;
    use tempfile::NamedTempFile;

    fn post(title: &str) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: Bilingual {
                kr: title.to_string(),
                cn: String::new(),
            },
            description: Bilingual::default(),
            label: "기타".to_string(),
            location: "연길 (延吉)".to_string(),
            contact: Contact {
                phone: "138-0000-0000".to_string(),
                wechat: None,
            },
            details: ListingDetails::CommunityUsed {
                price: Some("5만".to_string()),
                deal_type: None,
                photos: vec![],
            },
            status: PostStatus::Active,
            report_count: 0,
            likes: 0,
            dislikes: 0,
            views: 0,
            created_at: now,
            expires_at: now,
            urgent: false,
            premium: false,
            premium_until: None,
            ad: false,
            comments: vec![],
            inquiries: vec![],
        }
    }

    #[tokio::test]
    async fn test_json_persistence_roundtrip() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_owned();
        drop(tmp);

        let store = JsonPostStore::new(path.clone());
        let mut p = post("아이폰 중고 판매");
        p.comments.push(Comment::new("nick", "가격 문의".to_string(), Utc::now()));
        store.insert(p.clone()).await.unwrap();

        // Reload from file
        let store2 = JsonPostStore::new(path.clone());
        let loaded = store2.get(p.id).await.unwrap().unwrap();
        assert_eq!(loaded.title.kr, "아이폰 중고 판매");
        assert_eq!(loaded.details, p.details);
        assert_eq!(loaded.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_order_survives_reload() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_owned();
        drop(tmp);

        let store = JsonPostStore::new(path.clone());
        let older = post("older");
        let newer = post("newer");
        store.insert(older.clone()).await.unwrap();
        store.insert(newer.clone()).await.unwrap();

        let store2 = JsonPostStore::new(path);
        let all = store2.all().await.unwrap();
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
    }

    #[tokio::test]
    async fn test_unreadable_file_starts_empty() {
        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"not json at all").unwrap();

        let store = JsonPostStore::new(tmp.path().to_owned());
        assert!(store.all().await.unwrap().is_empty());
    }
}
