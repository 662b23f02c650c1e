// Feed composition - turns the stored collection into what one viewer sees.
//
// Pure: takes a snapshot of the collection plus the viewing context and
// returns the filtered, ordered sequence. The http layer decides who counts
// as an admin; this module only cares about the resulting visibility rule.

use crate::core::board::{CategoryType, Post, PostStatus};

/// Who is looking at the feed. Admins (in admin mode) see every status;
/// everyone else sees active listings only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Public,
    Admin,
}

/// One feed request: exactly one category tab, an optional free-text query,
/// and an optional exact-match region filter.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub category: CategoryType,
    pub search: String,
    pub region: Option<String>,
    pub viewer: Viewer,
}

impl FeedQuery {
    pub fn for_category(category: CategoryType) -> Self {
        Self {
            category,
            search: String::new(),
            region: None,
            viewer: Viewer::Public,
        }
    }
}

/// Whether a single post is visible to the viewer at all (shared by the
/// feed and the single-post endpoint).
pub fn is_visible_to(post: &Post, viewer: Viewer) -> bool {
    match viewer {
        Viewer::Admin => true,
        Viewer::Public => post.status == PostStatus::Active,
    }
}

fn matches_search(post: &Post, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    post.title.kr.to_lowercase().contains(needle)
        || post.title.cn.to_lowercase().contains(needle)
        || post
            .details
            .shop_name()
            .map(|name| name.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// Filters and orders a collection snapshot for one viewer.
///
/// Filters, all of which must pass: category tab, case-insensitive substring
/// search over both title languages and the shop name, exact region match,
/// visibility. Ordering: premium listings first, then newest first by
/// calendar day; the sort is stable so same-day listings keep their stored
/// (newest-first insertion) order. An empty result is a perfectly valid
/// feed.
pub fn compose(mut posts: Vec<Post>, query: &FeedQuery) -> Vec<Post> {
    let needle = query.search.trim().to_lowercase();

    posts.retain(|post| {
        post.category() == query.category
            && matches_search(post, &needle)
            && query
                .region
                .as_ref()
                .map(|region| post.location == *region)
                .unwrap_or(true)
            && is_visible_to(post, query.viewer)
    });

    // Day precision on purpose: listings from the same day tie and keep
    // their stored newest-first order instead of jittering by the second.
    posts.sort_by(|a, b| {
        b.premium
            .cmp(&a.premium)
            .then(b.created_at.date_naive().cmp(&a.created_at.date_naive()))
    });

    posts
}
