use axum::Json;
use utoipa::OpenApi;

use crate::api;
use crate::domain::{Post, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::user::list_users,
        api::user::create_user,
        api::post::get_feed,
        api::post::get_post,
        api::post::create_post,
        api::post::publish_post,
        api::post::delete_post,
    ),
    components(
        schemas(
            User,
            Post,
            api::user::CreateUserRequest,
            api::user::NestedPostRequest,
            api::post::CreatePostRequest,
        )
    ),
    tags(
        (name = "blog-api", description = "Users, posts and the public feed")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
