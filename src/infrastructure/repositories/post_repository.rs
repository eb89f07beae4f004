//! SeaORM implementation of PostRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    CreatePostInput, DomainError, Post, PostFilter, PostRepository, UpdatePostInput, User,
};
use crate::models::post::{ActiveModel, Column, Entity as PostEntity};
use crate::models::user;

/// SeaORM-based implementation of PostRepository
pub struct SeaOrmPostRepository {
    db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_all(
        &self,
        filter: PostFilter,
        include_author: bool,
    ) -> Result<Vec<Post>, DomainError> {
        let mut query = PostEntity::find().order_by_asc(Column::Id);

        if let Some(published) = filter.published {
            query = query.filter(Column::Published.eq(published));
        }

        if !include_author {
            let posts = query.all(&self.db).await?;
            return Ok(posts.into_iter().map(Post::from).collect());
        }

        let posts_with_authors = query.find_also_related(user::Entity).all(&self.db).await?;

        Ok(posts_with_authors
            .into_iter()
            .map(|(post, author)| Post {
                author: author.map(|a| Box::new(User::from(a))),
                ..Post::from(post)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError> {
        let post = PostEntity::find_by_id(id).one(&self.db).await?;
        Ok(post.map(Post::from))
    }

    async fn create(&self, input: CreatePostInput) -> Result<Post, DomainError> {
        let author_id = match input.author_email {
            Some(email) => {
                let author = user::Entity::find()
                    .filter(user::Column::Email.eq(email.as_str()))
                    .one(&self.db)
                    .await?
                    .ok_or(DomainError::NotFound)?;
                Some(author.id)
            }
            None => None,
        };

        let now = chrono::Utc::now().to_rfc3339();

        let new_post = ActiveModel {
            title: Set(input.title),
            content: Set(input.content),
            published: Set(input.published),
            author_id: Set(author_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_post.insert(&self.db).await?;

        Ok(Post::from(result))
    }

    async fn update(&self, id: i32, input: UpdatePostInput) -> Result<Post, DomainError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(published) = input.published {
            active.published = Set(published);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;

        Ok(Post::from(result))
    }

    async fn delete(&self, id: i32) -> Result<Post, DomainError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let result = PostEntity::delete_by_id(id).exec(&self.db).await?;

        // Lost a race with a concurrent delete
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(Post::from(existing))
    }
}
