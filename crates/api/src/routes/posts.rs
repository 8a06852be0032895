use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use review_portal_core::workflow::{AllowList, StatusChange, StatusUpdate};
use review_portal_core::{Post, PostPreview};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Review queue and review decision routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/update-status", post(update_status))
        .route("/api/posts/{id}", get(get_post))
        .route("/api/posts/{id}/preview", get(preview_post))
        .route("/api/posts/{id}/approve", post(approve_post))
        .route("/api/posts/{id}/request-revision", post(request_revision))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Ack {
    success: bool,
    message: String,
    #[serde(flatten)]
    change: StatusChange,
}

impl From<StatusChange> for Ack {
    fn from(change: StatusChange) -> Self {
        Self {
            success: true,
            message: format!("Post status updated to \"{}\"", change.status),
            change,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RevisionRequest {
    #[serde(default)]
    comment: Option<String>,
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Post {id} not found"))
}

/// Posts in the review queue, earliest scheduled first.
async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let posts = state
        .workflow()
        .pending()
        .await
        .map_err(ApiError::review("Failed to fetch posts"))?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Post>> {
    state
        .workflow()
        .post(&id)
        .await
        .map_err(ApiError::review("Failed to fetch post"))?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn preview_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostPreview>> {
    state
        .workflow()
        .preview(&id)
        .await
        .map_err(ApiError::review("Failed to fetch post"))?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// Generic status change: `{id | postId, status, comment?}`.
async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let change = state
        .workflow()
        .update_status(&request, &AllowList::UPDATE_STATUS)
        .await
        .map_err(ApiError::review("Failed to update post"))?;
    Ok(Json(change.into()))
}

async fn approve_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ack>> {
    let change = state
        .workflow()
        .approve(&id)
        .await
        .map_err(ApiError::review("Failed to update post"))?;
    Ok(Json(change.into()))
}

/// The body is optional; an empty body means no comment.
async fn request_revision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Ack>> {
    let request: RevisionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RevisionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let change = state
        .workflow()
        .request_revision(&id, request.comment.as_deref())
        .await
        .map_err(ApiError::review("Failed to update post"))?;
    Ok(Json(change.into()))
}
