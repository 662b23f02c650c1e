// Core moderation module - admission gating and the report-threshold
// state machine shared by posts and comments.

pub mod moderation_models;
pub mod moderation_rules;

pub use moderation_models::*;
pub use moderation_rules::*;
