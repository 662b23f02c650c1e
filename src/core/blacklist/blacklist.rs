// Blacklist - submitter values blocked before content is ever admitted.
//
// A sibling top-level collection next to the posts; entries are matched by
// exact value equality against the submitter's phone number at gate time.
// The optional expiry is stored but not consulted yet - whether blocks
// should lapse automatically is a moderation-policy decision that has not
// been taken, so the matching stays value-only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::board::StoreError;

/// What kind of value an entry blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistKind {
    Phone,
    Ip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistItem {
    pub id: Uuid,
    pub kind: BlacklistKind,
    pub value: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl BlacklistItem {
    /// A phone entry, the only kind the admin surface currently creates.
    pub fn phone(value: String, reason: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: BlacklistKind::Phone,
            value,
            reason,
            created_at: now,
            expires_at: None,
        }
    }
}

#[async_trait]
pub trait BlacklistStore: Send + Sync {
    async fn insert(&self, item: BlacklistItem) -> Result<(), StoreError>;

    async fn all(&self) -> Result<Vec<BlacklistItem>, StoreError>;

    /// Returns false when the entry was already gone.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Exact value-equality membership check, expiry ignored.
    async fn is_listed(&self, value: &str) -> Result<bool, StoreError>;
}
