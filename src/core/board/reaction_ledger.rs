// Best-effort duplicate suppression for reactions.
//
// A ledger of (viewer, target, kind) tuples checked before the counter
// increment. The viewer token is chosen client-side per device, so this is
// a heuristic against casual double-voting, not a security boundary - a
// fresh token can always react again.

use dashmap::DashSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reactions a post accepts. Comment likes reuse the ledger with their own
/// claim kind, see [`ReactionLedger::claim_comment_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LedgerKey {
    viewer: String,
    target: Uuid,
    kind: &'static str,
}

/// In-memory set of already-claimed reactions. Not persisted - losing the
/// markers on restart only means a viewer can react once more.
#[derive(Default)]
pub struct ReactionLedger {
    seen: DashSet<LedgerKey>,
}

impl ReactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the (viewer, post, kind) tuple. Returns false when the viewer
    /// already reacted with this kind on this post.
    pub fn claim(&self, viewer: &str, post_id: Uuid, kind: ReactionKind) -> bool {
        self.seen.insert(LedgerKey {
            viewer: viewer.to_string(),
            target: post_id,
            kind: kind.as_str(),
        })
    }

    /// Claims a comment like for the viewer.
    pub fn claim_comment_like(&self, viewer: &str, comment_id: Uuid) -> bool {
        self.seen.insert(LedgerKey {
            viewer: viewer.to_string(),
            target: comment_id,
            kind: "comment-like",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_claims_once() {
        let ledger = ReactionLedger::new();
        let post = Uuid::new_v4();
        assert!(ledger.claim("viewer-a", post, ReactionKind::Like));
        assert!(!ledger.claim("viewer-a", post, ReactionKind::Like));
    }

    #[test]
    fn test_kinds_and_viewers_are_independent() {
        let ledger = ReactionLedger::new();
        let post = Uuid::new_v4();
        assert!(ledger.claim("viewer-a", post, ReactionKind::Like));
        assert!(ledger.claim("viewer-a", post, ReactionKind::Dislike));
        assert!(ledger.claim("viewer-b", post, ReactionKind::Like));
    }

    #[test]
    fn test_comment_likes_do_not_collide_with_post_likes() {
        let ledger = ReactionLedger::new();
        let id = Uuid::new_v4();
        assert!(ledger.claim("viewer-a", id, ReactionKind::Like));
        assert!(ledger.claim_comment_like("viewer-a", id));
        assert!(!ledger.claim_comment_like("viewer-a", id));
    }
}
