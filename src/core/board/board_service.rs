// Board service - every portal operation runs through here.
//
// The service is a thin read-modify-write loop: fetch a record from the
// store, apply a pure rule from `core::moderation` / `core::feed`, save it
// back. Mutations addressed at ids that are no longer present return Ok and
// change nothing - the deliberate policy for a portal where an admin may
// have deleted the target a moment earlier.
//
// Ports are boxed trait objects so the composition root can pick JSON-file
// stores in production and in-memory ones in tests.

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::board_models::{Comment, InquiryMessage, Post, PostDraft, PostStatus, LISTING_TTL_DAYS};
use super::board_store::{PostStore, StoreError};
use super::reaction_ledger::{ReactionKind, ReactionLedger};
use crate::core::blacklist::{BlacklistItem, BlacklistStore};
use crate::core::feed::{self, FeedQuery, Viewer};
use crate::core::moderation::{self, GateRejection, WordFilter};
use crate::core::stats::{self, PortalStats};
use crate::core::translation::{TranslationError, Translator};

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Submitter's phone is blacklisted. Not worth retrying as-is.
    #[error("submitter is blocked")]
    BlockedSubmitter,
    /// A text field contains a banned term; the submitter may edit and retry.
    #[error("content contains a banned term")]
    BannedContent,
    /// The bilingual-generation call failed; nothing was persisted.
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<GateRejection> for BoardError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::BlockedSubmitter => BoardError::BlockedSubmitter,
            GateRejection::BannedContent => BoardError::BannedContent,
        }
    }
}

/// Admin-togglable display flags on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFlag {
    Urgent,
    Premium,
    Ad,
}

/// Outcome of an admitted submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub post: Post,
    /// True for partnership proposals, which wait for manual approval.
    pub pending_review: bool,
}

pub struct BoardService {
    store: Box<dyn PostStore>,
    blacklist: Box<dyn BlacklistStore>,
    translator: Box<dyn Translator>,
    word_filter: WordFilter,
    reactions: ReactionLedger,
}

impl BoardService {
    pub fn new(
        store: Box<dyn PostStore>,
        blacklist: Box<dyn BlacklistStore>,
        translator: Box<dyn Translator>,
        word_filter: WordFilter,
    ) -> Self {
        Self {
            store,
            blacklist,
            translator,
            word_filter,
            reactions: ReactionLedger::new(),
        }
    }

    // ========================================================================
    // SUBMISSION
    // ========================================================================

    /// Runs a draft through translation and the admission gate.
    ///
    /// The translation call is the only suspension point and happens first;
    /// the gate then screens the *resulting* bilingual text. A failure at
    /// any step leaves the collection untouched.
    pub async fn submit_post(&self, draft: PostDraft) -> Result<Submission, BoardError> {
        let bilingual = self
            .translator
            .bilingual_post(draft.source_title(), &draft.description, draft.source_lang)
            .await?;

        if self.blacklist.is_listed(&draft.contact.phone).await? {
            return Err(BoardError::BlockedSubmitter);
        }
        self.word_filter.screen([
            bilingual.title.kr.as_str(),
            bilingual.title.cn.as_str(),
            bilingual.description.kr.as_str(),
            bilingual.description.cn.as_str(),
        ])?;

        let status = moderation::initial_status(draft.details.category());
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: bilingual.title,
            description: bilingual.description,
            label: draft.label,
            location: draft.location,
            contact: draft.contact,
            details: draft.details,
            status,
            report_count: 0,
            likes: 0,
            dislikes: 0,
            views: 0,
            created_at: now,
            expires_at: now + Duration::days(LISTING_TTL_DAYS),
            urgent: false,
            premium: false,
            premium_until: None,
            ad: false,
            comments: vec![],
            inquiries: vec![],
        };

        self.store.insert(post.clone()).await?;
        Ok(Submission {
            pending_review: status == PostStatus::Pending,
            post,
        })
    }

    /// Adds a comment under a post. Same banned-word gate as posts, no
    /// blacklist or translation. New comments are prepended, then the list
    /// is re-sorted by likes so they land right behind the liked ones.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        nickname: &str,
        content: String,
    ) -> Result<(), BoardError> {
        self.word_filter.screen([content.as_str()])?;

        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        post.comments.insert(0, Comment::new(nickname, content, Utc::now()));
        post.sort_comments();
        self.store.save(post).await?;
        Ok(())
    }

    /// Appends a private inquiry (partnership listings). Gated like comments.
    pub async fn add_inquiry(
        &self,
        post_id: Uuid,
        sender_name: String,
        message: String,
    ) -> Result<(), BoardError> {
        self.word_filter.screen([message.as_str()])?;

        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        post.inquiries.push(InquiryMessage {
            id: Uuid::new_v4(),
            sender_name,
            message,
            created_at: Utc::now(),
        });
        self.store.save(post).await?;
        Ok(())
    }

    // ========================================================================
    // REPORTS & REACTIONS
    // ========================================================================

    /// One report against a post. No per-viewer suppression here -
    /// reactions are deduplicated, reports deliberately are not.
    pub async fn report_post(&self, post_id: Uuid) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        let outcome = moderation::record_post_report(&mut post);
        if outcome.escalated {
            tracing::warn!(
                post_id = %post.id,
                reports = outcome.new_count,
                "Post auto-banned by report threshold"
            );
        }
        self.store.save(post).await?;
        Ok(())
    }

    pub async fn report_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        if let Some(comment) = post.comments.iter_mut().find(|c| c.id == comment_id) {
            let outcome = moderation::record_comment_report(comment);
            if outcome.escalated {
                tracing::warn!(
                    post_id = %post_id,
                    comment_id = %comment_id,
                    reports = outcome.new_count,
                    "Comment hidden by report threshold"
                );
            }
            self.store.save(post).await?;
        }
        Ok(())
    }

    /// Like or dislike a post, once per viewer token per kind. A repeat from
    /// the same viewer is a silent no-op; a missing token skips suppression
    /// entirely (the ledger is best-effort by design).
    pub async fn react(
        &self,
        viewer: Option<&str>,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<(), BoardError> {
        if let Some(viewer) = viewer {
            if !self.reactions.claim(viewer, post_id, kind) {
                return Ok(());
            }
        }
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        match kind {
            ReactionKind::Like => post.likes += 1,
            ReactionKind::Dislike => post.dislikes += 1,
        }
        self.store.save(post).await?;
        Ok(())
    }

    /// Like a comment, once per viewer token, then re-sort the thread so the
    /// most-liked comments float up.
    pub async fn like_comment(
        &self,
        viewer: Option<&str>,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), BoardError> {
        if let Some(viewer) = viewer {
            if !self.reactions.claim_comment_like(viewer, comment_id) {
                return Ok(());
            }
        }
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        if let Some(comment) = post.comments.iter_mut().find(|c| c.id == comment_id) {
            comment.likes += 1;
            post.sort_comments();
            self.store.save(post).await?;
        }
        Ok(())
    }

    /// Unconditional view-count bump.
    pub async fn record_view(&self, post_id: Uuid) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        post.views += 1;
        self.store.save(post).await?;
        Ok(())
    }

    // ========================================================================
    // ADMIN
    // ========================================================================

    pub async fn approve_partnership(&self, post_id: Uuid) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        if moderation::approve(&mut post) {
            self.store.save(post).await?;
        }
        Ok(())
    }

    pub async fn reject_partnership(&self, post_id: Uuid) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        if moderation::reject(&mut post) {
            self.store.save(post).await?;
        }
        Ok(())
    }

    /// Marks a listing premium for `days` days from now. The expiry is
    /// stored for bookkeeping; nothing demotes the flag automatically.
    pub async fn grant_premium(&self, post_id: Uuid, days: i64) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        post.premium = true;
        post.premium_until = Some(Utc::now() + Duration::days(days));
        self.store.save(post).await?;
        Ok(())
    }

    pub async fn toggle_flag(&self, post_id: Uuid, flag: PostFlag) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        match flag {
            PostFlag::Urgent => post.urgent = !post.urgent,
            PostFlag::Premium => post.premium = !post.premium,
            PostFlag::Ad => post.ad = !post.ad,
        }
        self.store.save(post).await?;
        Ok(())
    }

    /// Hard delete. Ordinary users can never reach this; reports only hide.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<(), BoardError> {
        self.store.remove(post_id).await?;
        Ok(())
    }

    pub async fn delete_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), BoardError> {
        let Some(mut post) = self.store.get(post_id).await? else {
            return Ok(());
        };
        let before = post.comments.len();
        post.comments.retain(|c| c.id != comment_id);
        if post.comments.len() != before {
            self.store.save(post).await?;
        }
        Ok(())
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub async fn feed(&self, query: &FeedQuery) -> Result<Vec<Post>, BoardError> {
        Ok(feed::compose(self.store.all().await?, query))
    }

    pub async fn get_post(&self, post_id: Uuid, viewer: Viewer) -> Result<Option<Post>, BoardError> {
        Ok(self
            .store
            .get(post_id)
            .await?
            .filter(|post| feed::is_visible_to(post, viewer)))
    }

    pub async fn stats(&self) -> Result<PortalStats, BoardError> {
        let posts = self.store.all().await?;
        Ok(stats::snapshot(&posts, Utc::now().date_naive()))
    }

    // ========================================================================
    // BLACKLIST
    // ========================================================================

    pub async fn add_blacklist_entry(
        &self,
        value: String,
        reason: String,
    ) -> Result<BlacklistItem, BoardError> {
        let item = BlacklistItem::phone(value, reason, Utc::now());
        self.blacklist.insert(item.clone()).await?;
        Ok(item)
    }

    pub async fn blacklist_entries(&self) -> Result<Vec<BlacklistItem>, BoardError> {
        Ok(self.blacklist.all().await?)
    }

    pub async fn remove_blacklist_entry(&self, id: Uuid) -> Result<(), BoardError> {
        self.blacklist.remove(id).await?;
        Ok(())
    }
}
