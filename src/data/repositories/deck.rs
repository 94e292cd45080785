use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::data::models::{Deck, DeckSummary, NewCard, NewDeck};
use crate::schema::{cards, decks};

pub struct DeckRepository;

impl DeckRepository {
    /// All decks of a user, newest first.
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<DeckSummary>, diesel::result::Error> {
        let decks = decks::table
            .filter(decks::user_id.eq(user_id))
            .order((decks::created_at.desc(), decks::deck_id.desc()))
            .select(Deck::as_select())
            .load(conn)?;

        Self::with_card_counts(conn, decks)
    }

    /// The `limit` most recently updated decks of a user.
    pub fn recent_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<DeckSummary>, diesel::result::Error> {
        let decks = decks::table
            .filter(decks::user_id.eq(user_id))
            .order((decks::updated_at.desc(), decks::deck_id.desc()))
            .limit(limit)
            .select(Deck::as_select())
            .load(conn)?;

        Self::with_card_counts(conn, decks)
    }

    /// The deck, only if it belongs to `user_id`.
    pub fn find_owned(
        conn: &mut SqliteConnection,
        user_id: i32,
        deck_id: i32,
    ) -> Result<Option<Deck>, diesel::result::Error> {
        decks::table
            .filter(decks::deck_id.eq(deck_id))
            .filter(decks::user_id.eq(user_id))
            .select(Deck::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        user_id: i32,
        title: &str,
        emoji: &str,
        color: &str,
    ) -> Result<Deck, diesel::result::Error> {
        let now = Utc::now().naive_utc();

        diesel::insert_into(decks::table)
            .values(&NewDeck {
                user_id,
                title: title.trim(),
                emoji,
                color,
                created_at: now,
                updated_at: now,
            })
            .returning(Deck::as_returning())
            .get_result(conn)
    }

    /// Creates a deck and its cards in one transaction. `cards` are
    /// `(question, answer)` pairs; every card gets `tags`.
    pub fn create_with_cards(
        conn: &mut SqliteConnection,
        user_id: i32,
        title: &str,
        emoji: &str,
        color: &str,
        cards: &[(String, String)],
        tags: &[String],
    ) -> Result<(Deck, usize), diesel::result::Error> {
        conn.transaction(|conn| {
            let deck = Self::create(conn, user_id, title, emoji, color)?;
            let now = Utc::now().naive_utc();

            let rows: Vec<NewCard> = cards
                .iter()
                .map(|(question, answer)| NewCard::new(deck.deck_id, question, answer, tags, now))
                .collect();

            if rows.is_empty() {
                return Ok((deck, 0));
            }

            let inserted = diesel::insert_into(cards::table)
                .values(&rows)
                .execute(conn)?;

            Ok((deck, inserted))
        })
    }

    /// Deletes the deck if the user owns it. Cards, study logs and reviews
    /// go with it through the schema's cascade rules.
    pub fn delete_owned(
        conn: &mut SqliteConnection,
        user_id: i32,
        deck_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        let deleted = diesel::delete(
            decks::table
                .filter(decks::deck_id.eq(deck_id))
                .filter(decks::user_id.eq(user_id)),
        )
        .execute(conn)?;

        Ok(deleted > 0)
    }

    pub fn touch(
        conn: &mut SqliteConnection,
        deck_id: i32,
        now: NaiveDateTime,
    ) -> Result<(), diesel::result::Error> {
        diesel::update(decks::table.find(deck_id))
            .set(decks::updated_at.eq(now))
            .execute(conn)?;
        Ok(())
    }

    fn with_card_counts(
        conn: &mut SqliteConnection,
        decks: Vec<Deck>,
    ) -> Result<Vec<DeckSummary>, diesel::result::Error> {
        let ids: Vec<i32> = decks.iter().map(|d| d.deck_id).collect();

        let counts: HashMap<i32, i64> = cards::table
            .filter(cards::deck_id.eq_any(ids))
            .group_by(cards::deck_id)
            .select((cards::deck_id, diesel::dsl::count(cards::card_id)))
            .load::<(i32, i64)>(conn)?
            .into_iter()
            .collect();

        Ok(decks
            .into_iter()
            .map(|deck| DeckSummary {
                card_count: counts.get(&deck.deck_id).copied().unwrap_or(0),
                deck,
            })
            .collect())
    }
}
