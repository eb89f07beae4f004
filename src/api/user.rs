//! User API handlers using repository pattern

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::error::ApiResult;
use crate::domain::{CreateUserInput, DomainError, NewPost, User};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Embed each user's posts
    #[serde(default)]
    pub include_posts: bool,
}

/// Request DTO for creating a user; only these fields are accepted
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: String,
    /// Posts created together with the user, as drafts
    #[serde(default)]
    pub posts: Vec<NestedPostRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NestedPostRequest {
    pub title: String,
    pub content: Option<String>,
}

impl CreateUserRequest {
    fn into_input(self) -> Result<CreateUserInput, DomainError> {
        let email = self.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }

        let mut posts = Vec::with_capacity(self.posts.len());
        for post in self.posts {
            posts.push(NewPost {
                title: super::post::require_title(post.title)?,
                content: post.content,
                published: false,
            });
        }

        Ok(CreateUserInput {
            name: self.name,
            email,
            posts,
        })
    }
}

#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "All users", body = [User])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_repo.find_all(query.include_posts).await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid email or post title"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let input = payload.into_input()?;
    let user = state.user_repo.create(input).await?;

    tracing::info!("User {} created", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}
