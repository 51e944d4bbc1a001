//! Post CRUD handlers. Each performs a single repository call.

use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;

use postboard_core::{NewPost, PostChanges, PostId};
use postboard_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Decode a JSON request body. The content type is not checked, and an
/// empty body reads as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> AppResult<T> {
    if body.trim_ascii().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::BadRequest(format!("Invalid JSON body: {e}"))
    })
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .find_all()
        .await
        .map_err(|e| AppError::store(e, "Failed to fetch posts"))?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());

    let post = state
        .posts
        .find_by_id(&id)
        .await
        .map_err(|e| AppError::store(e, "Error fetching post"))?
        .ok_or_else(AppError::post_not_found)?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = parse_body(&body)?;
    let updated_at = req
        .updated_at()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let new_post = NewPost::new(req.title, req.content, updated_at)?;

    let post = state
        .posts
        .create(new_post)
        .await
        .map_err(|e| AppError::store(e, "Error creating post"))?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PUT /posts/{id}
///
/// A falsy `updatedAt` is treated like a missing one: the stored timestamp
/// becomes the current time either way.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let req: UpdatePostRequest = parse_body(&body)?;
    let updated_at = req
        .updated_at()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let changes = PostChanges::new(req.title, req.content, updated_at);

    let post = state
        .posts
        .update(&id, changes)
        .await
        .map_err(|e| AppError::store(e, "Error updating post"))?
        .ok_or_else(AppError::post_not_found)?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());

    let post = state
        .posts
        .delete(&id)
        .await
        .map_err(|e| AppError::store(e, "Error deleting post"))?
        .ok_or_else(AppError::post_not_found)?;

    tracing::info!(post_id = %post.id, "Post deleted");
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}
