// Board domain models - the data structures behind the classifieds portal.
//
// These are pure domain types with no HTTP or storage dependencies.
// The http layer converts these to response payloads; the infra layer
// serializes them as-is into the JSON collection files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a freshly admitted listing stays before its expiry date.
pub const LISTING_TTL_DAYS: i64 = 30;

/// Nickname used when a commenter leaves the field blank.
pub const ANONYMOUS_NICKNAME: &str = "anonymous";

/// The two languages the portal serves. Every listing carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "KR")]
    Korean,
    #[serde(rename = "CN")]
    Chinese,
}

/// A piece of text kept in both portal languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bilingual {
    pub kr: String,
    pub cn: String,
}

/// The nine fixed listing categories. One tab per category in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    Recruitment,
    Resume,
    Parttime,
    Business,
    Promo,
    RealEstate,
    CommunityPhoto,
    CommunityUsed,
    Partnership,
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CategoryType::Recruitment => "RECRUITMENT",
            CategoryType::Resume => "RESUME",
            CategoryType::Parttime => "PARTTIME",
            CategoryType::Business => "BUSINESS",
            CategoryType::Promo => "PROMO",
            CategoryType::RealEstate => "REAL_ESTATE",
            CategoryType::CommunityPhoto => "COMMUNITY_PHOTO",
            CategoryType::CommunityUsed => "COMMUNITY_USED",
            CategoryType::Partnership => "PARTNERSHIP",
        };
        write!(f, "{}", name)
    }
}

/// Moderation status of a listing.
///
/// `Hidden` and `Deleted` mostly matter for comments, but the type admits
/// them for posts as well so an admin can soft-hide a listing without
/// removing it from the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Active,
    Pending,
    Rejected,
    Banned,
    Hidden,
    Deleted,
}

/// Comments only ever toggle between visible and report-hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Active,
    Hidden,
}

/// How to reach the poster. Phone is mandatory (it is also what the
/// blacklist matches against); WeChat is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wechat: Option<String>,
}

/// Category-specific listing attributes.
///
/// Keyed by category so a real-estate listing cannot carry a salary. The
/// post's category is *derived* from the variant, which makes a
/// category/payload mismatch unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingDetails {
    #[serde(rename_all = "camelCase")]
    Recruitment {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        salary: Option<String>,
        #[serde(default)]
        korean_required: bool,
        #[serde(default)]
        dormitory: bool,
    },
    Resume,
    #[serde(rename_all = "camelCase")]
    Parttime {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        salary: Option<String>,
        #[serde(default)]
        korean_required: bool,
        #[serde(default)]
        dormitory: bool,
    },
    #[serde(rename_all = "camelCase")]
    Business {
        shop_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        open_hours: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tags: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Promo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promo_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    RealEstate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        area: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        floor: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deal_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estate_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        move_in_date: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    CommunityPhoto {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        photos: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    CommunityUsed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deal_type: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        photos: Vec<String>,
    },
    Partnership,
}

impl ListingDetails {
    /// The category this payload belongs to.
    pub fn category(&self) -> CategoryType {
        match self {
            ListingDetails::Recruitment { .. } => CategoryType::Recruitment,
            ListingDetails::Resume => CategoryType::Resume,
            ListingDetails::Parttime { .. } => CategoryType::Parttime,
            ListingDetails::Business { .. } => CategoryType::Business,
            ListingDetails::Promo { .. } => CategoryType::Promo,
            ListingDetails::RealEstate { .. } => CategoryType::RealEstate,
            ListingDetails::CommunityPhoto { .. } => CategoryType::CommunityPhoto,
            ListingDetails::CommunityUsed { .. } => CategoryType::CommunityUsed,
            ListingDetails::Partnership => CategoryType::Partnership,
        }
    }

    /// Shop name, for the business-category search match.
    pub fn shop_name(&self) -> Option<&str> {
        match self {
            ListingDetails::Business { shop_name, .. } => Some(shop_name),
            _ => None,
        }
    }
}

/// A reader comment under a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub nickname: String,
    pub content: String,
    pub likes: u32,
    pub report_count: u32,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(nickname: &str, content: String, now: DateTime<Utc>) -> Self {
        let nickname = nickname.trim();
        Self {
            id: Uuid::new_v4(),
            nickname: if nickname.is_empty() {
                ANONYMOUS_NICKNAME.to_string()
            } else {
                nickname.to_string()
            },
            content,
            likes: 0,
            report_count: 0,
            status: CommentStatus::Active,
            created_at: now,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.status == CommentStatus::Active
    }
}

/// A private inquiry to the poster, used by the partnership category.
/// Append-only; never edited or reacted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryMessage {
    pub id: Uuid,
    pub sender_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A single classified listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: Bilingual,
    pub description: Bilingual,
    /// Free-form sub-category label shown on the card (e.g. "카페").
    pub label: String,
    pub location: String,
    pub contact: Contact,
    #[serde(flatten)]
    pub details: ListingDetails,
    pub status: PostStatus,
    /// Never decremented. Crossing the ban threshold flips status to Banned.
    pub report_count: u32,
    pub likes: u32,
    pub dislikes: u32,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub urgent: bool,
    pub premium: bool,
    /// Stored when premium is granted; nothing currently reads it back to
    /// demote the flag. Premium is a manual-only control for now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_until: Option<DateTime<Utc>>,
    pub ad: bool,
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inquiries: Vec<InquiryMessage>,
}

impl Post {
    pub fn category(&self) -> CategoryType {
        self.details.category()
    }

    /// Comments a non-admin viewer may see. Report-hidden comments stay
    /// stored but are excluded from lists and counts.
    pub fn visible_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(|c| c.is_visible())
    }

    /// Re-apply the comment ordering rule: descending like count, stable,
    /// so ties keep their current relative order.
    pub fn sort_comments(&mut self) {
        self.comments.sort_by(|a, b| b.likes.cmp(&a.likes));
    }
}

/// What a submitter provides. The bilingual text pair is produced by the
/// translation collaborator before the gate runs; everything else is carried
/// through unchanged.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub source_lang: Language,
    pub title: String,
    pub description: String,
    pub label: String,
    pub location: String,
    pub contact: Contact,
    pub details: ListingDetails,
}

impl PostDraft {
    /// The text handed to the translator as the title. Business listings may
    /// leave the title blank and lead with the shop name instead.
    pub fn source_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.details.shop_name().unwrap_or(&self.title)
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_derived_from_payload() {
        let details = ListingDetails::Business {
            shop_name: "연길맛집".to_string(),
            address: None,
            open_hours: None,
            tags: vec![],
        };
        assert_eq!(details.category(), CategoryType::Business);
        assert_eq!(details.shop_name(), Some("연길맛집"));
        assert_eq!(ListingDetails::Partnership.category(), CategoryType::Partnership);
    }

    #[test]
    fn test_blank_nickname_defaults_to_anonymous() {
        let now = Utc::now();
        let comment = Comment::new("  ", "좋은 정보 감사합니다".to_string(), now);
        assert_eq!(comment.nickname, ANONYMOUS_NICKNAME);
        let named = Comment::new("길동", "불합리한 가격".to_string(), now);
        assert_eq!(named.nickname, "길동");
    }

    #[test]
    fn test_details_roundtrip_keeps_category_tag() {
        let details = ListingDetails::RealEstate {
            price: Some("80만".to_string()),
            area: Some("33평".to_string()),
            floor: None,
            deal_type: Some("월세".to_string()),
            estate_type: None,
            move_in_date: None,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "REAL_ESTATE");
        let back: ListingDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn test_source_title_falls_back_to_shop_name() {
        let draft = PostDraft {
            source_lang: Language::Korean,
            title: String::new(),
            description: "30년 전통".to_string(),
            label: "식당".to_string(),
            location: "연길 (延吉)".to_string(),
            contact: Contact {
                phone: "138-0000-1111".to_string(),
                wechat: None,
            },
            details: ListingDetails::Business {
                shop_name: "연길맛집".to_string(),
                address: None,
                open_hours: None,
                tags: vec![],
            },
        };
        assert_eq!(draft.source_title(), "연길맛집");
    }
}
