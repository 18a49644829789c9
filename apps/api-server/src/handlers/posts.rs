//! Blog post handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{
    CreatePostRequest, CreatedPostResponse, EntityResponse, PostListResponse, UpdatePostRequest,
};
use quill_shared::parse_payload;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/blog - Protected route
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = parse_payload(&body)?;

    let post = state.posts.create(&identity.0, req.into()).await?;
    tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");

    Ok(HttpResponse::Ok().json(CreatedPostResponse { id: post.id }))
}

/// PUT /api/v1/blog - Protected route, owner only
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: UpdatePostRequest = parse_payload(&body)?;
    let (id, draft) = req.into_parts();

    let post = state.posts.update(&identity.0, id, draft).await?;
    tracing::info!(post_id = post.id, "Post updated");

    Ok(HttpResponse::Ok().json(EntityResponse { response: post }))
}

/// GET /api/v1/blog/bulk
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state.posts.list().await?;

    Ok(HttpResponse::Ok().json(PostListResponse { blogs }))
}

/// GET /api/v1/blog/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let id: i32 = raw
        .parse()
        .map_err(|_| AppError::NotFound(format!("post id {:?} is not numeric", raw)))?;

    let post = state.posts.get(id).await?;

    Ok(HttpResponse::Ok().json(EntityResponse { response: post }))
}
