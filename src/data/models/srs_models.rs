use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};

use crate::schema::card_reviews;

/// Scheduling state of one card for one user
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = card_reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CardReview {
    pub review_id: i32,
    pub user_id: i32,
    pub card_id: i32,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub last_rating: i32,
    pub reviewed_at: NaiveDateTime,
    pub next_review_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = card_reviews)]
pub struct NewCardReview {
    pub user_id: i32,
    pub card_id: i32,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub last_rating: i32,
    pub reviewed_at: NaiveDateTime,
    pub next_review_at: NaiveDateTime,
}
