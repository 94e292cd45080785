pub mod stats;

use axum::{routing::get, Router};

use crate::database::DbPool;

pub fn dashboard_router(pool: DbPool) -> Router {
    Router::new()
        .route("/dashboard", get(stats::dashboard))
        .with_state(pool)
}
