//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::DomainError;

/// User data for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    /// Only populated when posts were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
}

/// Post data for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
    /// Only populated when the author was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Box<User>>,
}

/// A post created together with its author
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
}

/// Input for creating a user, optionally with nested posts
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: String,
    pub posts: Vec<NewPost>,
}

/// Input for creating a post
#[derive(Debug, Clone)]
pub struct CreatePostInput {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    /// Email of an existing user to link as author
    pub author_email: Option<String>,
}

/// Input for updating a post; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub published: Option<bool>,
}

/// Filter criteria for post queries
#[derive(Debug, Default, Clone)]
pub struct PostFilter {
    pub published: Option<bool>,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find all users, with their posts when `include_posts` is set
    async fn find_all(&self, include_posts: bool) -> Result<Vec<User>, DomainError>;

    /// Create a user and its nested posts in a single transaction
    async fn create(&self, input: CreateUserInput) -> Result<User, DomainError>;
}

/// Repository trait for Post entity
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find all posts matching the filter, with their author when `include_author` is set
    async fn find_all(
        &self,
        filter: PostFilter,
        include_author: bool,
    ) -> Result<Vec<Post>, DomainError>;

    /// Find a single post by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError>;

    /// Create a new post, linking the author by email
    async fn create(&self, input: CreatePostInput) -> Result<Post, DomainError>;

    /// Update an existing post
    async fn update(&self, id: i32, input: UpdatePostInput) -> Result<Post, DomainError>;

    /// Delete a post by ID, returning its state before deletion
    async fn delete(&self, id: i32) -> Result<Post, DomainError>;
}
