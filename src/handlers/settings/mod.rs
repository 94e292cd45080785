pub mod profile;

use axum::{routing::get, Router};

use crate::database::DbPool;

pub fn settings_router(pool: DbPool) -> Router {
    Router::new()
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .with_state(pool)
}
