// The infra module contains implementations of core ports.
// Each feature implementation goes in its own submodule.

#[path = "board/board_stores.rs"]
pub mod board;

#[path = "blacklist/blacklist_stores.rs"]
pub mod blacklist;

#[path = "translation/translation_providers.rs"]
pub mod translation;
