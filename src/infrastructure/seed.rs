use crate::domain::{CreateUserInput, DomainError, NewPost, PostFilter};
use crate::infrastructure::AppState;

struct DemoUser {
    name: &'static str,
    email: &'static str,
    posts: &'static [(&'static str, Option<&'static str>, bool)],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Alice",
        email: "alice@example.com",
        posts: &[("Join the Rust community", Some("https://www.rust-lang.org/community"), true)],
    },
    DemoUser {
        name: "Bob",
        email: "bob@example.com",
        posts: &[
            ("Follow Rust on Mastodon", Some("https://social.rust-lang.org/@rust"), true),
            ("Ask a question about async Rust", None, false),
        ],
    },
];

/// Create the demo users with their posts. Users whose email is already
/// taken are skipped, so running it twice is harmless.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    for demo in DEMO_USERS {
        let input = CreateUserInput {
            name: Some(demo.name.to_owned()),
            email: demo.email.to_owned(),
            posts: demo
                .posts
                .iter()
                .map(|(title, content, published)| NewPost {
                    title: (*title).to_owned(),
                    content: content.map(str::to_owned),
                    published: *published,
                })
                .collect(),
        };

        let user = match state.user_repo.create(input).await {
            Ok(user) => user,
            Err(DomainError::Conflict(_)) => {
                tracing::info!("Demo user {} already exists, skipping", demo.email);
                continue;
            }
            Err(e) => return Err(e),
        };

        let created = user.posts.map_or(0, |posts| posts.len());
        tracing::info!("Created demo user {} with {} post(s)", demo.email, created);
    }

    let users = state.user_repo.find_all(true).await?;
    let feed = state
        .post_repo
        .find_all(
            PostFilter {
                published: Some(true),
            },
            false,
        )
        .await?;
    tracing::info!("{} user(s) and {} published post(s) in store", users.len(), feed.len());

    Ok(())
}
