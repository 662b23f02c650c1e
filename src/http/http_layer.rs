// The http module is the portal's surface: a JSON API consumed by the
// browser client. Handlers stay thin - extract, call the board service,
// map the error. All policy lives in core.

pub mod admin_routes;
pub mod board_routes;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::board::{BoardError, BoardService};
use crate::core::feed::Viewer;

/// Header carrying the shared admin secret. Presence of the right value
/// switches feeds into admin mode and unlocks `/api/admin/*`.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Header carrying the client-chosen viewer token used for reaction dedup.
pub const VIEWER_TOKEN_HEADER: &str = "x-viewer-token";

pub struct AppState {
    pub board: BoardService,
    pub admin_token: String,
}

/// Builds the full application router.
///
/// CORS is wide open on purpose - the portal is an anonymous public site
/// and the SPA client may be served from another origin.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(board_routes::routes())
        .merge(admin_routes::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// ERROR MAPPING
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Board(BoardError),
    Unauthorized,
    /// Only reads 404; mutations on missing ids are silent no-ops in core.
    NotFound,
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        ApiError::Board(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "admin token missing or invalid".to_string(),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "post not found".to_string()),
            ApiError::Board(BoardError::BlockedSubmitter) => (
                StatusCode::FORBIDDEN,
                "this contact number is blocked from posting".to_string(),
            ),
            ApiError::Board(BoardError::BannedContent) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "the content contains a banned term".to_string(),
            ),
            ApiError::Board(BoardError::Translation(err)) => {
                tracing::error!("Bilingual generation failed: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "posting failed, please try again".to_string(),
                )
            }
            ApiError::Board(BoardError::Store(err)) => {
                tracing::error!("Store failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ============================================================================
// REQUEST CONTEXT HELPERS
// ============================================================================

pub(crate) fn is_admin(state: &AppState, headers: &HeaderMap) -> bool {
    headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|token| token == state.admin_token)
        .unwrap_or(false)
}

pub(crate) fn viewer_for(state: &AppState, headers: &HeaderMap) -> Viewer {
    if is_admin(state, headers) {
        Viewer::Admin
    } else {
        Viewer::Public
    }
}

pub(crate) fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if is_admin(state, headers) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// The reaction-dedup token, if the client sent one. Clients that omit it
/// simply get no duplicate suppression.
pub(crate) fn viewer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(VIEWER_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

// ============================================================================
// TEST SUPPORT
// ============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::moderation::WordFilter;
    use crate::infra::blacklist::InMemoryBlacklistStore;
    use crate::infra::board::InMemoryPostStore;
    use crate::infra::translation::MirrorTranslator;

    pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

    /// A full router over in-memory stores and the mirror translator.
    pub fn test_router() -> Router {
        let board = BoardService::new(
            Box::new(InMemoryPostStore::new()),
            Box::new(InMemoryBlacklistStore::new()),
            Box::new(MirrorTranslator),
            WordFilter::default(),
        );
        router(Arc::new(AppState {
            board,
            admin_token: TEST_ADMIN_TOKEN.to_string(),
        }))
    }
}
