use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    data::models::{
        ApiError, ApiResponse, CardView, CreateDeckRequest, Deck, DeckSummary, DeckWithCards,
        DEFAULT_DECK_COLOR, DEFAULT_DECK_EMOJI,
    },
    data::repositories::{CardRepository, DeckRepository},
    database::DbPool,
    utils,
};

pub async fn list_decks(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
) -> Result<Json<Vec<DeckSummary>>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut conn = pool.get()?;

    Ok(Json(DeckRepository::list_for_user(&mut conn, user_id)?))
}

pub async fn create_deck(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<Deck>), ApiError> {
    let user_id = utils::require_user(&session).await?;
    payload.validate()?;

    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title must not be blank".into()));
    }

    let mut conn = pool.get()?;
    let deck = DeckRepository::create(
        &mut conn,
        user_id,
        &payload.title,
        payload.emoji.as_deref().unwrap_or(DEFAULT_DECK_EMOJI),
        payload.color.as_deref().unwrap_or(DEFAULT_DECK_COLOR),
    )?;

    log::info!("User {} created deck {}", user_id, deck.deck_id);
    Ok((StatusCode::CREATED, Json(deck)))
}

pub async fn view_deck(
    Path(deck_id): Path<i32>,
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
) -> Result<Json<DeckWithCards>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut conn = pool.get()?;

    let deck = DeckRepository::find_owned(&mut conn, user_id, deck_id)?
        .ok_or(ApiError::NotFound("Deck"))?;

    let cards = CardRepository::list_for_deck(&mut conn, deck_id)?
        .into_iter()
        .map(CardView::from)
        .collect();

    Ok(Json(DeckWithCards { deck, cards }))
}

pub async fn delete_deck(
    Path(deck_id): Path<i32>,
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
) -> Result<Json<ApiResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut conn = pool.get()?;

    if !DeckRepository::delete_owned(&mut conn, user_id, deck_id)? {
        return Err(ApiError::NotFound("Deck"));
    }

    log::info!("User {} deleted deck {}", user_id, deck_id);
    Ok(Json(ApiResponse::ok("Deck deleted successfully")))
}
