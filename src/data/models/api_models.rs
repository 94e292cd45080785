use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::features::generation::{GenerationError, PdfError};
use crate::features::quiz::QuizError;

/// Errors returned by the JSON API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("Card generation is not configured")]
    GenerationDisabled,
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Connection pool error")]
    PoolError(#[from] r2d2::Error),
    #[error("Session error: {0}")]
    SessionError(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Pdf(#[from] PdfError),
}
