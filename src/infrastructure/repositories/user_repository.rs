//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{CreateUserInput, DomainError, Post, User, UserRepository};
use crate::models::post;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self, include_posts: bool) -> Result<Vec<User>, DomainError> {
        let query = UserEntity::find().order_by_asc(Column::Id);

        if !include_posts {
            let users = query.all(&self.db).await?;
            return Ok(users.into_iter().map(User::from).collect());
        }

        let users_with_posts = query
            .find_with_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await?;

        Ok(users_with_posts
            .into_iter()
            .map(|(user, posts)| User {
                posts: Some(posts.into_iter().map(Post::from).collect()),
                ..User::from(user)
            })
            .collect())
    }

    async fn create(&self, input: CreateUserInput) -> Result<User, DomainError> {
        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await?;

        let user = ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut posts = Vec::with_capacity(input.posts.len());
        for new_post in input.posts {
            let created = post::ActiveModel {
                title: Set(new_post.title),
                content: Set(new_post.content),
                published: Set(new_post.published),
                author_id: Set(Some(user.id)),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            posts.push(Post::from(created));
        }

        txn.commit().await?;

        tracing::debug!("Created user {} with {} post(s)", user.id, posts.len());

        Ok(User {
            posts: (!posts.is_empty()).then_some(posts),
            ..User::from(user)
        })
    }
}
