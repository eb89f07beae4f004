//! Post API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::error::ApiResult;
use crate::domain::{CreatePostInput, DomainError, Post, PostFilter, UpdatePostInput};
use crate::infrastructure::AppState;

/// Request DTO for creating a draft post; only these fields are accepted
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: Option<String>,
    /// Email of the existing user who wrote the post
    pub author_email: Option<String>,
}

pub(crate) fn require_title(title: String) -> Result<String, DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be blank".to_string()));
    }
    Ok(title)
}

#[utoipa::path(
    get,
    path = "/feed",
    responses(
        (status = 200, description = "Published posts with their author", body = [Post])
    )
)]
pub async fn get_feed(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let filter = PostFilter {
        published: Some(true),
    };
    let posts = state.post_repo.find_all(filter, true).await?;
    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/post/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post, or null when no post has this id", body = Post)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Option<Post>>> {
    let post = state.post_repo.find_by_id(id).await?;
    Ok(Json(post))
}

#[utoipa::path(
    post,
    path = "/post",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Draft created", body = Post),
        (status = 400, description = "Blank title"),
        (status = 404, description = "No user with authorEmail")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let input = CreatePostInput {
        title: require_title(payload.title)?,
        content: payload.content,
        published: false,
        author_email: payload.author_email.map(|e| e.trim().to_string()),
    };

    let post = state.post_repo.create(input).await?;

    tracing::info!("Draft post {} created", post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/post/publish/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post is published", body = Post),
        (status = 404, description = "Post not found")
    )
)]
pub async fn publish_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Post>> {
    let input = UpdatePostInput {
        published: Some(true),
        ..Default::default()
    };
    let post = state.post_repo.update(id, input).await?;
    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/post/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Deleted post as it was before removal", body = Post),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Post>> {
    let post = state.post_repo.delete(id).await?;

    tracing::info!("Post {} deleted", id);
    Ok(Json(post))
}
