pub mod cards;
pub mod decks;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::database::DbPool;

pub fn deck_router(pool: DbPool) -> Router {
    Router::new()
        .route("/decks", get(decks::list_decks).post(decks::create_deck))
        .route("/decks/{deck_id}", get(decks::view_deck).delete(decks::delete_deck))
        .route("/decks/{deck_id}/cards", post(cards::add_card))
        .route("/cards/{card_id}", delete(cards::delete_card))
        .with_state(pool)
}
