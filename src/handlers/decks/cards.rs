use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    data::models::{ApiError, ApiResponse, CardView, CreateCardRequest, NewCard},
    data::repositories::{CardRepository, DeckRepository},
    database::DbPool,
    utils,
};

pub async fn add_card(
    Path(deck_id): Path<i32>,
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(payload): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CardView>), ApiError> {
    let user_id = utils::require_user(&session).await?;
    payload.validate()?;

    if payload.question.trim().is_empty() || payload.answer.trim().is_empty() {
        return Err(ApiError::BadRequest("Question and answer are required".into()));
    }

    let mut conn = pool.get()?;
    DeckRepository::find_owned(&mut conn, user_id, deck_id)?.ok_or(ApiError::NotFound("Deck"))?;

    let now = Utc::now().naive_utc();
    let card = CardRepository::add(
        &mut conn,
        &NewCard::new(deck_id, &payload.question, &payload.answer, &payload.tags, now),
    )?;
    DeckRepository::touch(&mut conn, deck_id, now)?;

    Ok((StatusCode::CREATED, Json(CardView::from(card))))
}

pub async fn delete_card(
    Path(card_id): Path<i32>,
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
) -> Result<Json<ApiResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut conn = pool.get()?;

    let deck_id = CardRepository::delete_owned(&mut conn, user_id, card_id)?
        .ok_or(ApiError::NotFound("Card"))?;
    DeckRepository::touch(&mut conn, deck_id, Utc::now().naive_utc())?;

    Ok(Json(ApiResponse::ok("Card deleted successfully")))
}
