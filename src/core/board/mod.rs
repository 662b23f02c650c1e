// Core board module - the listing collection and everything that mutates it.
// Following the same models / store / service split as the other features.

pub mod board_models;
pub mod board_service;
pub mod board_store;
pub mod reaction_ledger;

pub use board_models::*;
pub use board_service::{BoardError, BoardService, PostFlag, Submission};
pub use board_store::{PostStore, StoreError};
pub use reaction_ledger::{ReactionKind, ReactionLedger};
