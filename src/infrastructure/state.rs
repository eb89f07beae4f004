//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{PostRepository, UserRepository};
use crate::infrastructure::{SeaOrmPostRepository, SeaOrmUserRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Post repository
    pub post_repo: Arc<dyn PostRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let post_repo = Arc::new(SeaOrmPostRepository::new(db.clone()));

        Self {
            db,
            user_repo,
            post_repo,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
