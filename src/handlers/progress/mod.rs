pub mod progress;

use axum::{routing::get, Router};

use crate::database::DbPool;

pub fn progress_router(pool: DbPool) -> Router {
    Router::new()
        .route("/progress", get(progress::progress))
        .with_state(pool)
}
