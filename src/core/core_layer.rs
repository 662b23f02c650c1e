// The core module contains all business logic.
// Each feature gets its own submodule. Nothing in here knows about HTTP,
// files, or the Gemini API - those live in `infra/` and `http/`.

#[path = "board/mod.rs"]
pub mod board;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "feed/feed_composer.rs"]
pub mod feed;

#[path = "blacklist/blacklist.rs"]
pub mod blacklist;

#[path = "stats/portal_stats.rs"]
pub mod stats;

#[path = "translation/translation.rs"]
pub mod translation;
