use axum::extract::{Json, State};
use chrono::Utc;
use serde::Serialize;

use crate::{
    data::models::{ApiError, DeckSummary},
    data::repositories::{CardRepository, DeckRepository, ProfileRepository, StudyLogRepository},
    database::DbPool,
    features::stats::{self, DashboardStats},
    utils,
};

const RECENT_DECKS: i64 = 2;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub first_name: String,
    pub stats: DashboardStats,
    pub recent_decks: Vec<DeckSummary>,
}

pub async fn dashboard(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
) -> Result<Json<DashboardResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut conn = pool.get()?;

    let full_name = ProfileRepository::find(&mut conn, user_id)?
        .map(|profile| profile.full_name)
        .unwrap_or_default();

    let cards_generated = CardRepository::count_for_user(&mut conn, user_id)?;
    let logs = StudyLogRepository::outcomes_for_user(&mut conn, user_id)?;
    let today = Utc::now().date_naive();

    Ok(Json(DashboardResponse {
        first_name: stats::first_name(&full_name).to_string(),
        stats: DashboardStats::from_logs(cards_generated, &logs, today),
        recent_decks: DeckRepository::recent_for_user(&mut conn, user_id, RECENT_DECKS)?,
    }))
}
