use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_api::infrastructure::AppState;
use blog_api::{config, db, seed, server};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let conn = match db::init_db(&config.database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(conn.clone());
    let mut failed = false;

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        match seed::seed_demo_data(&state).await {
            Ok(()) => tracing::info!("Demo data seeded successfully."),
            Err(e) => {
                tracing::error!("Failed to seed data: {}", e);
                failed = true;
            }
        }
    }

    if !failed {
        if let Err(e) = server::run_server(&config, state).await {
            tracing::error!("Server error: {}", e);
            failed = true;
        }
    }

    // Release pooled connections whichever way we got here
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
