pub mod error;
pub mod health;
pub mod post;
pub mod user;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api_docs;
use crate::infrastructure::AppState;

pub use error::{ApiError, ApiResult};

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(api_docs::openapi_json))
        // Users
        .route("/users", get(user::list_users))
        .route("/user", post(user::create_user))
        // Posts
        .route("/feed", get(post::get_feed))
        .route("/post", post(post::create_post))
        .route("/post/:id", get(post::get_post).delete(post::delete_post))
        .route("/post/publish/:id", put(post::publish_post))
        .with_state(state)
}
