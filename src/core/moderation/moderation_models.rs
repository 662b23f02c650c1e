// Moderation domain models - thresholds, gate decisions, and the word list.
//
// The thresholds are deliberately fixed rather than per-deployment config:
// the portal serves one city and the numbers are part of its house rules.

use serde::{Deserialize, Serialize};

/// Reports at which a post is force-banned, whatever its prior status.
pub const POST_BAN_THRESHOLD: u32 = 5;

/// Reports at which a comment is hidden from every non-admin surface.
pub const COMMENT_HIDE_THRESHOLD: u32 = 3;

/// Terms rejected at submission time, matched case-insensitively as
/// substrings. Deployments can override the list via configuration.
pub const DEFAULT_BANNED_TERMS: &[&str] = &[
    "도박",
    "카지노",
    "사설토토",
    "대출",
    "사기",
    "마약",
    "성인용품",
    "赌博",
    "博彩",
    "贷款",
    "诈骗",
    "毒品",
    "casino",
];

/// Why a submission was turned away at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRejection {
    /// The submitter's phone number matches a blacklist entry.
    BlockedSubmitter,
    /// A text field contains a banned term.
    BannedContent,
}

impl std::fmt::Display for GateRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateRejection::BlockedSubmitter => write!(f, "submitter is blocked"),
            GateRejection::BannedContent => write!(f, "content contains a banned term"),
        }
    }
}

/// Result of recording a report against a post or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub new_count: u32,
    /// True the first time the threshold flips the status over.
    pub escalated: bool,
}
