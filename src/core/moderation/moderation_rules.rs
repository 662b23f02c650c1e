// Moderation rules - pure functions over a single record.
//
// Every status transition in the portal funnels through here:
// - the banned-word screen at submission time
// - report counting with the automatic ban/hide thresholds
// - the partnership approval workflow (pending -> active | rejected)
//
// Keeping these as plain functions over `&mut Post` / `&mut Comment` means
// the service layer stays a thin read-modify-write loop and the invariants
// are testable without any store behind them.

use super::moderation_models::{
    GateRejection, ReportOutcome, COMMENT_HIDE_THRESHOLD, POST_BAN_THRESHOLD,
};
use crate::core::board::{CategoryType, Comment, CommentStatus, Post, PostStatus};

// ============================================================================
// BANNED-WORD SCREEN
// ============================================================================

/// Case-insensitive substring filter over submitted text.
pub struct WordFilter {
    terms: Vec<String>,
}

impl WordFilter {
    /// Builds a filter from any term list. Terms are matched lowercased;
    /// blank entries are dropped so a sloppy config line cannot ban
    /// everything.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// The first banned term found in `text`, if any.
    pub fn hit(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| haystack.contains(term.as_str()))
            .map(|t| t.as_str())
    }

    /// Screens every field of a submission. Used for the four bilingual post
    /// fields as well as single comment/inquiry bodies.
    pub fn screen<'a, I>(&self, fields: I) -> Result<(), GateRejection>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for field in fields {
            if self.hit(field).is_some() {
                return Err(GateRejection::BannedContent);
            }
        }
        Ok(())
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(super::moderation_models::DEFAULT_BANNED_TERMS)
    }
}

// ============================================================================
// ADMISSION
// ============================================================================

/// Status a freshly gated submission starts in. Partnership proposals wait
/// for manual review; every other category goes straight to the feed.
pub fn initial_status(category: CategoryType) -> PostStatus {
    match category {
        CategoryType::Partnership => PostStatus::Pending,
        _ => PostStatus::Active,
    }
}

// ============================================================================
// REPORT THRESHOLDS
// ============================================================================

/// Records one report against a post. At the threshold the post is banned,
/// overriding any prior status, and there is no automatic way back.
pub fn record_post_report(post: &mut Post) -> ReportOutcome {
    post.report_count += 1;
    let escalated = post.report_count >= POST_BAN_THRESHOLD && post.status != PostStatus::Banned;
    if escalated {
        post.status = PostStatus::Banned;
    }
    ReportOutcome {
        new_count: post.report_count,
        escalated,
    }
}

/// Records one report against a comment. At the threshold the comment is
/// hidden; it stays stored but drops out of rendered lists and counts.
pub fn record_comment_report(comment: &mut Comment) -> ReportOutcome {
    comment.report_count += 1;
    let escalated =
        comment.report_count >= COMMENT_HIDE_THRESHOLD && comment.status != CommentStatus::Hidden;
    if escalated {
        comment.status = CommentStatus::Hidden;
    }
    ReportOutcome {
        new_count: comment.report_count,
        escalated,
    }
}

// ============================================================================
// PARTNERSHIP APPROVAL
// ============================================================================

/// Pending -> Active. Returns false (and changes nothing) from any other
/// state; in particular a rejected or banned post stays where it is.
pub fn approve(post: &mut Post) -> bool {
    if post.status == PostStatus::Pending {
        post.status = PostStatus::Active;
        true
    } else {
        false
    }
}

/// Pending -> Rejected. Rejection is terminal; only the report threshold
/// can still move the post (to Banned).
pub fn reject(post: &mut Post) -> bool {
    if post.status == PostStatus::Pending {
        post.status = PostStatus::Rejected;
        true
    } else {
        false
    }
}
