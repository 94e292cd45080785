use anyhow::Context as _;
use axum::{extract::Extension, routing::get_service, Router};
use std::sync::Arc;
use tera::Tera;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

mod config;
mod data;
mod database;
mod features;
mod handlers;
mod schema;
mod utils;

use config::Config;
use features::generation::GroqClient;
use handlers::{auth, dashboard, decks, generate, pages, progress, settings, study};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    // Database configuration
    let pool = database::build_pool(&config.database_url)
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    {
        let mut conn = pool.get().context("failed to get a DB connection")?;
        database::init_schema(&mut conn).context("failed to create schema")?;
    }

    // Templates configuration
    let templates = Arc::new(Tera::new("templates/**/*.html").context("template parsing error")?);

    // Sessions configuration
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(config.session_secure);

    // LLM client, absent without an API key
    let groq = match config.groq_api_key.clone() {
        Some(key) => Some(Arc::new(GroqClient::new(
            key,
            config.groq_model.clone(),
            config.groq_base_url.clone(),
        )?)),
        None => None,
    };

    // JSON API
    let api_router = Router::new()
        .merge(decks::deck_router(pool.clone()))
        .merge(study::study_router(pool.clone()))
        .merge(generate::generate_router(pool.clone(), groq))
        .merge(dashboard::dashboard_router(pool.clone()))
        .merge(progress::progress_router(pool.clone()))
        .merge(settings::settings_router(pool.clone()));

    // Auth router
    let auth_router = Router::new()
        .merge(auth::login::auth_router(pool.clone(), templates.clone()))
        .merge(auth::register::auth_router(pool.clone(), templates.clone()));

    // Main application router
    let app = Router::new()
        .merge(pages::page_router())
        .nest("/auth", auth_router)
        .nest("/api", api_router)
        .nest_service("/static", get_service(ServeDir::new("static")))
        .layer(Extension(templates))
        .layer(session_layer);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    log::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
