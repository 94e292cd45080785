pub mod generate;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::database::DbPool;
use crate::features::generation::{pdf::MAX_PDF_BYTES, GroqClient};

// multipart framing on top of the file itself
const PDF_BODY_LIMIT: usize = MAX_PDF_BYTES + 64 * 1024;

pub fn generate_router(pool: DbPool, client: Option<Arc<GroqClient>>) -> Router {
    Router::new()
        .route("/generate/text", post(generate::generate_from_text))
        .route(
            "/generate/pdf",
            post(generate::generate_from_pdf).layer(DefaultBodyLimit::max(PDF_BODY_LIMIT)),
        )
        .with_state((pool, client))
}
