use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::data::models::{CardReview, NewCardReview};
use crate::features::srs::{self, Rating};
use crate::schema::{card_reviews, cards};

pub struct ReviewRepository;

impl ReviewRepository {
    pub fn find(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
    ) -> Result<Option<CardReview>, diesel::result::Error> {
        card_reviews::table
            .filter(card_reviews::user_id.eq(user_id))
            .filter(card_reviews::card_id.eq(card_id))
            .select(CardReview::as_select())
            .first(conn)
            .optional()
    }

    /// Review state of every card in a deck the user has reviewed, keyed by card id.
    pub fn for_deck(
        conn: &mut SqliteConnection,
        user_id: i32,
        deck_id: i32,
    ) -> Result<HashMap<i32, CardReview>, diesel::result::Error> {
        Ok(card_reviews::table
            .inner_join(cards::table)
            .filter(cards::deck_id.eq(deck_id))
            .filter(card_reviews::user_id.eq(user_id))
            .select(CardReview::as_select())
            .load(conn)?
            .into_iter()
            .map(|review| (review.card_id, review))
            .collect())
    }

    /// Reschedules a card after a review and stores the new state.
    pub fn record(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
        rating: Rating,
        now: NaiveDateTime,
    ) -> Result<srs::Schedule, diesel::result::Error> {
        let previous = Self::find(conn, user_id, card_id)?;
        let next = srs::schedule(previous.as_ref(), rating, now);

        diesel::insert_into(card_reviews::table)
            .values(&NewCardReview {
                user_id,
                card_id,
                ease_factor: next.ease_factor,
                interval_days: next.interval_days,
                last_rating: rating.quality(),
                reviewed_at: now,
                next_review_at: next.next_review_at,
            })
            .on_conflict((card_reviews::user_id, card_reviews::card_id))
            .do_update()
            .set((
                card_reviews::ease_factor.eq(next.ease_factor),
                card_reviews::interval_days.eq(next.interval_days),
                card_reviews::last_rating.eq(rating.quality()),
                card_reviews::reviewed_at.eq(now),
                card_reviews::next_review_at.eq(next.next_review_at),
            ))
            .execute(conn)?;

        Ok(next)
    }
}
