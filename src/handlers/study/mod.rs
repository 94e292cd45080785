pub mod study;

use axum::{
    routing::{get, post},
    Router,
};

use crate::database::DbPool;

pub fn study_router(pool: DbPool) -> Router {
    Router::new()
        .route("/study/{deck_id}/start", post(study::start_session))
        .route(
            "/study/current",
            get(study::current_question).delete(study::abandon_session),
        )
        .route("/study/answer", post(study::answer_question))
        .with_state(pool)
}
