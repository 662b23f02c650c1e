// Admin endpoints. Every handler checks the shared token first; there is no
// user account system, so the token is the whole admin identity.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{require_admin, ApiError, AppState};
use crate::core::blacklist::BlacklistItem;
use crate::core::board::PostFlag;
use crate::core::stats::PortalStats;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/posts/{id}/approve", post(approve_partnership))
        .route("/api/admin/posts/{id}/reject", post(reject_partnership))
        .route("/api/admin/posts/{id}/premium", post(grant_premium))
        .route("/api/admin/posts/{id}/flags", post(toggle_flag))
        .route("/api/admin/posts/{id}", delete(delete_post))
        .route(
            "/api/admin/posts/{id}/comments/{comment_id}",
            delete(delete_comment),
        )
        .route("/api/admin/blacklist", get(list_blacklist).post(add_blacklist))
        .route("/api/admin/blacklist/{id}", delete(remove_blacklist))
        .route("/api/admin/stats", get(stats))
}

#[derive(Debug, Deserialize)]
struct PremiumRequest {
    days: i64,
}

#[derive(Debug, Deserialize)]
struct FlagRequest {
    flag: PostFlag,
}

#[derive(Debug, Deserialize)]
struct BlacklistRequest {
    value: String,
    #[serde(default)]
    reason: String,
}

fn ok() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn approve_partnership(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.approve_partnership(id).await?;
    tracing::info!(post_id = %id, "Partnership approved");
    Ok(ok())
}

async fn reject_partnership(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.reject_partnership(id).await?;
    tracing::info!(post_id = %id, "Partnership rejected");
    Ok(ok())
}

async fn grant_premium(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<PremiumRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.grant_premium(id, request.days).await?;
    Ok(ok())
}

async fn toggle_flag(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<FlagRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.toggle_flag(id, request.flag).await?;
    Ok(ok())
}

async fn delete_post(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.delete_post(id).await?;
    tracing::info!(post_id = %id, "Listing deleted by admin");
    Ok(ok())
}

async fn delete_comment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.delete_comment(id, comment_id).await?;
    Ok(ok())
}

async fn list_blacklist(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BlacklistItem>>, ApiError> {
    require_admin(&state, &headers)?;
    Ok(Json(state.board.blacklist_entries().await?))
}

async fn add_blacklist(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<BlacklistRequest>,
) -> Result<Json<BlacklistItem>, ApiError> {
    require_admin(&state, &headers)?;
    let item = state
        .board
        .add_blacklist_entry(request.value, request.reason)
        .await?;
    tracing::info!(value = %item.value, "Blacklist entry added");
    Ok(Json(item))
}

async fn remove_blacklist(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.board.remove_blacklist_entry(id).await?;
    Ok(ok())
}

async fn stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PortalStats>, ApiError> {
    require_admin(&state, &headers)?;
    Ok(Json(state.board.stats().await?))
}

#[cfg(test)]
mod tests {
    use crate::http::test_support::{test_router, TEST_ADMIN_TOKEN};
    use crate::http::ADMIN_TOKEN_HEADER;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn admin_post(uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(ADMIN_TOKEN_HEADER, TEST_ADMIN_TOKEN);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn admin_get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(ADMIN_TOKEN_HEADER, TEST_ADMIN_TOKEN)
            .body(Body::empty())
            .unwrap()
    }

    async fn submit_partnership(router: &Router, phone: &str) -> String {
        let body = json!({
            "lang": "KR",
            "title": "공동 브랜드 런칭",
            "description": "패션 브랜드 런칭 계획",
            "location": "연길 (延吉)",
            "phone": phone,
            "type": "PARTNERSHIP"
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/posts")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, value) = send(router, request).await;
        assert_eq!(status, StatusCode::CREATED);
        value["post"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_admin_endpoints_reject_missing_token() {
        let router = test_router();
        let id = uuid::Uuid::new_v4();

        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/admin/posts/{}/approve", id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/api/admin/stats")
            .header(ADMIN_TOKEN_HEADER, "wrong-token")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_approve_moves_pending_to_public_feed() {
        let router = test_router();
        let id = submit_partnership(&router, "138-9999-1111").await;

        let (status, _) = send(
            &router,
            admin_post(&format!("/api/admin/posts/{}/approve", id), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/api/posts?category=PARTNERSHIP")
            .body(Body::empty())
            .unwrap();
        let (_, feed) = send(&router, request).await;
        assert_eq!(feed.as_array().unwrap().len(), 1);
        assert_eq!(feed[0]["status"], json!("active"));
    }

    #[tokio::test]
    async fn test_reject_keeps_post_out_of_public_feed() {
        let router = test_router();
        let id = submit_partnership(&router, "138-9999-2222").await;

        send(
            &router,
            admin_post(&format!("/api/admin/posts/{}/reject", id), None),
        )
        .await;

        let request = Request::builder()
            .uri("/api/posts?category=PARTNERSHIP")
            .body(Body::empty())
            .unwrap();
        let (_, feed) = send(&router, request).await;
        assert!(feed.as_array().unwrap().is_empty());

        let (_, admin_view) = send(&router, admin_get(&format!("/api/posts/{}", id))).await;
        assert_eq!(admin_view["status"], json!("rejected"));
    }

    #[tokio::test]
    async fn test_blacklist_blocks_future_submissions() {
        let router = test_router();

        let (status, _) = send(
            &router,
            admin_post(
                "/api/admin/blacklist",
                Some(json!({ "value": "138-4444-4444", "reason": "반복 신고" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let body = json!({
            "lang": "KR",
            "title": "구인",
            "description": "일반 구인 글",
            "location": "연길 (延吉)",
            "phone": "138-4444-4444",
            "type": "RECRUITMENT"
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/posts")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, value) = send(&router, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(value["error"].as_str().unwrap().contains("blocked"));

        let (_, entries) = send(&router, admin_get("/api/admin/blacklist")).await;
        let entry_id = entries[0]["id"].as_str().unwrap().to_string();

        // Removing the entry lifts the block.
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/blacklist/{}", entry_id))
            .header(ADMIN_TOKEN_HEADER, TEST_ADMIN_TOKEN)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .method("POST")
            .uri("/api/posts")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_premium_and_flag_toggles_change_the_post() {
        let router = test_router();
        let id = submit_partnership(&router, "138-9999-3333").await;

        send(
            &router,
            admin_post(
                &format!("/api/admin/posts/{}/premium", id),
                Some(json!({ "days": 7 })),
            ),
        )
        .await;
        send(
            &router,
            admin_post(
                &format!("/api/admin/posts/{}/flags", id),
                Some(json!({ "flag": "urgent" })),
            ),
        )
        .await;

        let (_, post) = send(&router, admin_get(&format!("/api/posts/{}", id))).await;
        assert_eq!(post["premium"], json!(true));
        assert!(post["premiumUntil"].is_string());
        assert_eq!(post["urgent"], json!(true));
    }

    #[tokio::test]
    async fn test_delete_post_and_comment() {
        let router = test_router();
        let id = submit_partnership(&router, "138-9999-4444").await;

        let comment = Request::builder()
            .method("POST")
            .uri(format!("/api/posts/{}/comments", id))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "nickname": "a", "content": "문의드립니다" }).to_string(),
            ))
            .unwrap();
        send(&router, comment).await;

        let (_, post) = send(&router, admin_get(&format!("/api/posts/{}", id))).await;
        let comment_id = post["comments"][0]["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/posts/{}/comments/{}", id, comment_id))
            .header(ADMIN_TOKEN_HEADER, TEST_ADMIN_TOKEN)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);

        let (_, post) = send(&router, admin_get(&format!("/api/posts/{}", id))).await;
        assert!(post["comments"].as_array().unwrap().is_empty());

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/posts/{}", id))
            .header(ADMIN_TOKEN_HEADER, TEST_ADMIN_TOKEN)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&router, admin_get(&format!("/api/posts/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stats_snapshot() {
        let router = test_router();
        submit_partnership(&router, "138-9999-5555").await;
        let approved = submit_partnership(&router, "138-9999-6666").await;
        send(
            &router,
            admin_post(&format!("/api/admin/posts/{}/approve", approved), None),
        )
        .await;
        send(
            &router,
            admin_post(
                &format!("/api/admin/posts/{}/premium", approved),
                Some(json!({ "days": 30 })),
            ),
        )
        .await;

        let (status, stats) = send(&router, admin_get("/api/admin/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalPosts"], json!(2));
        assert_eq!(stats["newToday"], json!(2));
        assert_eq!(stats["pendingPartnerships"], json!(1));
        assert_eq!(stats["activePremium"], json!(1));
        assert_eq!(stats["topViewed"].as_array().unwrap().len(), 2);
    }
}
