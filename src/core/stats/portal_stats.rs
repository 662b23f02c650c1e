// Admin dashboard numbers, computed over a collection snapshot.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::core::board::{CategoryType, Post, PostStatus};

/// How many listings the "top viewed" panel shows.
const TOP_VIEWED_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopViewedPost {
    pub id: Uuid,
    pub title_kr: String,
    pub views: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalStats {
    pub total_posts: usize,
    pub new_today: usize,
    pub pending_partnerships: usize,
    pub active_premium: usize,
    pub top_viewed: Vec<TopViewedPost>,
}

/// Computes the dashboard snapshot. "Today" uses calendar-day precision,
/// same as the feed ordering.
pub fn snapshot(posts: &[Post], today: NaiveDate) -> PortalStats {
    let mut by_views: Vec<&Post> = posts.iter().collect();
    by_views.sort_by(|a, b| b.views.cmp(&a.views));

    PortalStats {
        total_posts: posts.len(),
        new_today: posts
            .iter()
            .filter(|p| p.created_at.date_naive() == today)
            .count(),
        pending_partnerships: posts
            .iter()
            .filter(|p| p.category() == CategoryType::Partnership && p.status == PostStatus::Pending)
            .count(),
        active_premium: posts.iter().filter(|p| p.premium).count(),
        top_viewed: by_views
            .into_iter()
            .take(TOP_VIEWED_LIMIT)
            .map(|p| TopViewedPost {
                id: p.id,
                title_kr: p.title.kr.clone(),
                views: p.views,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::{Bilingual, Contact, ListingDetails};
    use chrono::{Duration, Utc};

    fn post(views: u64, age_days: i64, details: ListingDetails, status: PostStatus) -> Post {
        let created = Utc::now() - Duration::days(age_days);
        Post {
            id: Uuid::new_v4(),
            title: Bilingual {
                kr: format!("{} views", views),
                cn: String::new(),
            },
            description: Bilingual::default(),
            label: "기타".to_string(),
            location: "연길 (延吉)".to_string(),
            contact: Contact {
                phone: "138-0000-0000".to_string(),
                wechat: None,
            },
            details,
            status,
            report_count: 0,
            likes: 0,
            dislikes: 0,
            views,
            created_at: created,
            expires_at: created + Duration::days(30),
            urgent: false,
            premium: false,
            premium_until: None,
            ad: false,
            comments: vec![],
            inquiries: vec![],
        }
    }

    fn job() -> ListingDetails {
        ListingDetails::Recruitment {
            salary: None,
            korean_required: false,
            dormitory: false,
        }
    }

    #[test]
    fn test_snapshot_counts() {
        let mut premium = post(10, 0, job(), PostStatus::Active);
        premium.premium = true;

        let posts = vec![
            premium,
            post(50, 1, job(), PostStatus::Active),
            post(5, 0, ListingDetails::Partnership, PostStatus::Pending),
            // An active partnership does not count as pending review.
            post(7, 2, ListingDetails::Partnership, PostStatus::Active),
        ];

        let stats = snapshot(&posts, Utc::now().date_naive());
        assert_eq!(stats.total_posts, 4);
        assert_eq!(stats.new_today, 2);
        assert_eq!(stats.pending_partnerships, 1);
        assert_eq!(stats.active_premium, 1);
    }

    #[test]
    fn test_top_viewed_is_capped_and_sorted() {
        let posts: Vec<Post> = (0..8)
            .map(|i| post(i * 10, 0, job(), PostStatus::Active))
            .collect();
        let stats = snapshot(&posts, Utc::now().date_naive());
        assert_eq!(stats.top_viewed.len(), 5);
        assert_eq!(stats.top_viewed[0].views, 70);
        assert_eq!(stats.top_viewed[4].views, 30);
    }
}
