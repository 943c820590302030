//! civ-modmaker Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modmaker_engine::admin::build_admin;
use modmaker_engine::api;
use modmaker_engine::app::{App, Repositories};
use modmaker_engine::infrastructure::{
    config::AppConfig,
    resources::ResourceStore,
    sqlite::{self, SqliteRepositories},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modmaker_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting civ-modmaker Engine");

    let config = AppConfig::from_env()?;
    tracing::info!(
        database = %config.database_path,
        resources = %config.resource_dir.display(),
        delete_policy = %config.delete_policy,
        "Configuration loaded"
    );

    let resources = ResourceStore::new(config.resource_dir.clone());
    resources.ensure_root().await?;

    tracing::info!("Opening SQLite database at {}", config.database_path);
    let pool = sqlite::connect(&config.database_path).await?;
    sqlite::ensure_schema(&pool).await?;
    let repos = Repositories::from(SqliteRepositories::new(pool));

    let admin = build_admin(&config.resource_dir)?;

    let app = Arc::new(App::new(repos, admin, resources, config.delete_policy));

    let router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
