use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::Deserialize;

use crate::features::srs::Rating;
use crate::schema::study_logs;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = study_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudyLog {
    pub log_id: i32,
    pub user_id: i32,
    pub deck_id: i32,
    pub card_id: i32,
    pub correct: bool,
    pub studied_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = study_logs)]
pub struct NewStudyLog {
    pub user_id: i32,
    pub deck_id: i32,
    pub card_id: i32,
    pub correct: bool,
    pub studied_at: NaiveDateTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartStudyRequest {
    pub limit: Option<usize>,
    #[serde(default)]
    pub due_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub choice: usize,
    pub rating: Option<Rating>,
}
