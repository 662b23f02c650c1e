// Public portal endpoints: the feed, submissions, and engagement actions.
//
// Responses reuse the domain `Post` directly, stripped for the viewer:
// non-admins never see report-hidden comments or the private inquiries.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{viewer_for, viewer_token, ApiError, AppState};
use crate::core::board::{
    Contact, Language, ListingDetails, Post, PostDraft, ReactionKind,
};
use crate::core::feed::{FeedQuery, Viewer};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", get(get_post))
        .route("/api/posts/{id}/view", post(record_view))
        .route("/api/posts/{id}/report", post(report_post))
        .route("/api/posts/{id}/react", post(react))
        .route("/api/posts/{id}/comments", post(add_comment))
        .route(
            "/api/posts/{id}/comments/{comment_id}/like",
            post(like_comment),
        )
        .route(
            "/api/posts/{id}/comments/{comment_id}/report",
            post(report_comment),
        )
        .route("/api/posts/{id}/inquiries", post(add_inquiry))
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeedParams {
    category: crate::core::board::CategoryType,
    #[serde(default)]
    q: String,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequest {
    lang: Language,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_label")]
    label: String,
    location: String,
    phone: String,
    #[serde(default)]
    wechat: Option<String>,
    #[serde(flatten)]
    details: ListingDetails,
}

/// Fallback sub-category label ("etc.") for drafts that leave it blank.
fn default_label() -> String {
    "기타".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionResponse {
    post: Post,
    /// True for partnership proposals: tells the client to show the
    /// "manual approval required" notice.
    pending_review: bool,
}

#[derive(Debug, Deserialize)]
struct ReactRequest {
    kind: ReactionKind,
}

#[derive(Debug, Deserialize)]
struct CommentRequest {
    #[serde(default)]
    nickname: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InquiryRequest {
    sender_name: String,
    message: String,
}

/// Strips a post down to what the viewer may see.
fn present_for(mut post: Post, viewer: Viewer) -> Post {
    if viewer == Viewer::Public {
        let visible: Vec<_> = post.visible_comments().cloned().collect();
        post.comments = visible;
        post.inquiries.clear();
    }
    post
}

fn ok() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn list_posts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let viewer = viewer_for(&state, &headers);
    let mut query = FeedQuery::for_category(params.category);
    query.search = params.q;
    query.region = params.region;
    query.viewer = viewer;
    let feed = state.board.feed(&query).await?;
    Ok(Json(
        feed.into_iter().map(|p| present_for(p, viewer)).collect(),
    ))
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(axum::http::StatusCode, Json<SubmissionResponse>), ApiError> {
    let draft = PostDraft {
        source_lang: request.lang,
        title: request.title,
        description: request.description,
        label: request.label,
        location: request.location,
        contact: Contact {
            phone: request.phone,
            wechat: request.wechat,
        },
        details: request.details,
    };

    let submission = state.board.submit_post(draft).await?;
    tracing::info!(
        post_id = %submission.post.id,
        category = %submission.post.category(),
        pending = submission.pending_review,
        "Listing admitted"
    );

    Ok((
        axum::http::StatusCode::CREATED,
        Json(SubmissionResponse {
            pending_review: submission.pending_review,
            post: submission.post,
        }),
    ))
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let viewer = viewer_for(&state, &headers);
    match state.board.get_post(id, viewer).await? {
        Some(post) => Ok(Json(present_for(post, viewer))),
        None => Err(ApiError::NotFound),
    }
}

async fn record_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.board.record_view(id).await?;
    Ok(ok())
}

async fn report_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.board.report_post(id).await?;
    Ok(ok())
}

async fn react(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<ReactRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let viewer = viewer_token(&headers);
    state
        .board
        .react(viewer.as_deref(), id, request.kind)
        .await?;
    Ok(ok())
}

async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .board
        .add_comment(id, &request.nickname, request.content)
        .await?;
    Ok(ok())
}

async fn like_comment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let viewer = viewer_token(&headers);
    state
        .board
        .like_comment(viewer.as_deref(), id, comment_id)
        .await?;
    Ok(ok())
}

async fn report_comment(
    State(state): State<Arc<AppState>>,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.board.report_comment(id, comment_id).await?;
    Ok(ok())
}

async fn add_inquiry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<InquiryRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .board
        .add_inquiry(id, request.sender_name, request.message)
        .await?;
    Ok(ok())
}

// ============================================================================
// TESTS
// ============================================================================
