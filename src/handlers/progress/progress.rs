use axum::extract::{Json, Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    data::models::ApiError,
    data::repositories::{CardRepository, DeckRepository, StudyLogRepository},
    database::DbPool,
    features::stats::{self, ProgressStats, PROGRESS_RANGES},
    utils,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProgressQuery {
    pub days: Option<u32>,
}

/// How well the student knows one deck
#[derive(Debug, PartialEq, Serialize)]
pub struct DeckMastery {
    pub deck_id: i32,
    pub title: String,
    pub emoji: String,
    pub color: String,
    pub reviews: usize,
    pub accuracy: u32,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub days: u32,
    pub stats: ProgressStats,
    pub decks: Vec<DeckMastery>,
}

pub fn resolve_range(days: Option<u32>) -> Result<u32, ApiError> {
    match days {
        None => Ok(PROGRESS_RANGES[0]),
        Some(days) if PROGRESS_RANGES.contains(&days) => Ok(days),
        Some(days) => Err(ApiError::BadRequest(format!(
            "Unsupported range: {} days",
            days
        ))),
    }
}

pub async fn progress(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let days = resolve_range(query.days)?;
    let mut conn = pool.get()?;

    let logs = StudyLogRepository::for_user(&mut conn, user_id)?;
    let cards_saved = CardRepository::count_for_user(&mut conn, user_id)?;
    let outcomes = stats::deck_outcomes(&logs);

    // studied decks only, most reviewed first
    let mut decks: Vec<DeckMastery> = DeckRepository::list_for_user(&mut conn, user_id)?
        .into_iter()
        .filter_map(|summary| {
            let (correct, wrong) = outcomes.get(&summary.deck.deck_id).copied()?;
            Some(DeckMastery {
                deck_id: summary.deck.deck_id,
                title: summary.deck.title,
                emoji: summary.deck.emoji,
                color: summary.deck.color,
                reviews: correct + wrong,
                accuracy: stats::accuracy(correct, wrong),
            })
        })
        .collect();
    decks.sort_by(|a, b| b.reviews.cmp(&a.reviews).then(a.deck_id.cmp(&b.deck_id)));

    Ok(Json(ProgressResponse {
        days,
        stats: ProgressStats::from_logs(cards_saved, &logs, Utc::now().date_naive(), days),
        decks,
    }))
}
