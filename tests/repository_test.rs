use blog_api::db;
use blog_api::domain::{
    CreatePostInput, CreateUserInput, DomainError, NewPost, PostFilter, UpdatePostInput,
};
use blog_api::infrastructure::AppState;
use blog_api::models::{post, user};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set, Statement};

async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn user_input(email: &str, titles: &[&str]) -> CreateUserInput {
    CreateUserInput {
        name: None,
        email: email.to_string(),
        posts: titles
            .iter()
            .map(|t| NewPost {
                title: t.to_string(),
                content: None,
                published: false,
            })
            .collect(),
    }
}

#[tokio::test]
async fn nested_create_rolls_back_when_a_post_fails() {
    let state = setup_test_state().await;

    // Break the child table so the insert after the user row fails
    state
        .db()
        .execute(Statement::from_string(
            state.db().get_database_backend(),
            "DROP TABLE posts".to_owned(),
        ))
        .await
        .unwrap();

    let result = state
        .user_repo
        .create(user_input("atomic@example.com", &["Never stored"]))
        .await;

    assert!(matches!(result, Err(DomainError::Database(_))));
    let users = user::Entity::find().count(state.db()).await.unwrap();
    assert_eq!(users, 0);
}

#[tokio::test]
async fn nested_create_links_every_post() {
    let state = setup_test_state().await;

    let created = state
        .user_repo
        .create(user_input("writer@example.com", &["One", "Two"]))
        .await
        .unwrap();

    let posts = created.posts.expect("nested posts returned");
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author_id == Some(created.id)));
    assert!(posts.iter().all(|p| !p.published));
    assert_eq!(post::Entity::find().count(state.db()).await.unwrap(), 2);
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let state = setup_test_state().await;

    state
        .user_repo
        .create(user_input("twin@example.com", &[]))
        .await
        .unwrap();
    let second = state
        .user_repo
        .create(user_input("twin@example.com", &["Lost"]))
        .await;

    assert!(matches!(second, Err(DomainError::Conflict(_))));
    assert_eq!(post::Entity::find().count(state.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn post_filter_and_author_inclusion() {
    let state = setup_test_state().await;
    state
        .user_repo
        .create(user_input("filter@example.com", &[]))
        .await
        .unwrap();

    let draft = state
        .post_repo
        .create(CreatePostInput {
            title: "Draft".to_string(),
            content: None,
            published: false,
            author_email: Some("filter@example.com".to_string()),
        })
        .await
        .unwrap();
    let live = state
        .post_repo
        .create(CreatePostInput {
            title: "Live".to_string(),
            content: Some("Text".to_string()),
            published: true,
            author_email: None,
        })
        .await
        .unwrap();

    let all = state
        .post_repo
        .find_all(PostFilter::default(), false)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|p| p.author.is_none()));

    let drafts = state
        .post_repo
        .find_all(
            PostFilter {
                published: Some(false),
            },
            true,
        )
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft.id);
    assert_eq!(
        drafts[0].author.as_ref().map(|a| a.email.as_str()),
        Some("filter@example.com")
    );

    let published = state
        .post_repo
        .find_all(
            PostFilter {
                published: Some(true),
            },
            true,
        )
        .await
        .unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, live.id);
    assert!(published[0].author.is_none());
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let state = setup_test_state().await;
    let created = state
        .post_repo
        .create(CreatePostInput {
            title: "Before".to_string(),
            content: Some("Keep me".to_string()),
            published: false,
            author_email: None,
        })
        .await
        .unwrap();

    let updated = state
        .post_repo
        .update(
            created.id,
            UpdatePostInput {
                title: Some("After".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.content.as_deref(), Some("Keep me"));
    assert!(!updated.published);

    let cleared = state
        .post_repo
        .update(
            created.id,
            UpdatePostInput {
                content: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.content.is_none());

    let missing = state
        .post_repo
        .update(created.id + 100, UpdatePostInput::default())
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let state = setup_test_state().await;
    let created = state
        .post_repo
        .create(CreatePostInput {
            title: "Gone".to_string(),
            content: None,
            published: true,
            author_email: None,
        })
        .await
        .unwrap();

    let deleted = state.post_repo.delete(created.id).await.unwrap();
    assert_eq!(deleted.title, "Gone");
    assert!(deleted.published);

    let again = state.post_repo.delete(created.id).await;
    assert!(matches!(again, Err(DomainError::NotFound)));
    assert!(state.post_repo.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn dangling_author_id_is_rejected() {
    let state = setup_test_state().await;
    let now = chrono::Utc::now().to_rfc3339();

    let result = post::ActiveModel {
        title: Set("Orphan".to_string()),
        content: Set(None),
        published: Set(false),
        author_id: Set(Some(999)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db())
    .await
    .map_err(DomainError::from);

    assert!(matches!(result, Err(DomainError::Conflict(_))));
    assert_eq!(post::Entity::find().count(state.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn nested_posts_listed_in_creation_order() {
    let state = setup_test_state().await;
    state
        .user_repo
        .create(user_input("first@example.com", &["A1"]))
        .await
        .unwrap();
    state
        .user_repo
        .create(user_input("second@example.com", &["B1", "B2", "B3"]))
        .await
        .unwrap();

    let users = state.user_repo.find_all(true).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "first@example.com");

    let posts = users[1].posts.as_ref().unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["B1", "B2", "B3"]);
    assert!(posts.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn nested_posts_keep_their_published_flag() {
    let state = setup_test_state().await;
    let input = CreateUserInput {
        name: Some("Publisher".to_string()),
        email: "publisher@example.com".to_string(),
        posts: vec![
            NewPost {
                title: "Live".to_string(),
                content: None,
                published: true,
            },
            NewPost {
                title: "Draft".to_string(),
                content: None,
                published: false,
            },
        ],
    };

    let created = state.user_repo.create(input).await.unwrap();
    let flags: Vec<bool> = created
        .posts
        .unwrap()
        .iter()
        .map(|p| p.published)
        .collect();
    assert_eq!(flags, [true, false]);

    let feed = state
        .post_repo
        .find_all(
            PostFilter {
                published: Some(true),
            },
            true,
        )
        .await
        .unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "Live");
}
