use diesel::prelude::*;

use crate::data::models::{Card, NewCard};
use crate::schema::{cards, decks};

pub struct CardRepository;

impl CardRepository {
    /// Cards of a deck in creation order.
    pub fn list_for_deck(
        conn: &mut SqliteConnection,
        deck_id: i32,
    ) -> Result<Vec<Card>, diesel::result::Error> {
        cards::table
            .filter(cards::deck_id.eq(deck_id))
            .order((cards::created_at.asc(), cards::card_id.asc()))
            .select(Card::as_select())
            .load(conn)
    }

    pub fn add(conn: &mut SqliteConnection, card: &NewCard) -> Result<Card, diesel::result::Error> {
        diesel::insert_into(cards::table)
            .values(card)
            .returning(Card::as_returning())
            .get_result(conn)
    }

    /// Deletes the card if it sits in one of the user's decks. Returns the
    /// deck it belonged to.
    pub fn delete_owned(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
    ) -> Result<Option<i32>, diesel::result::Error> {
        let deck_id = cards::table
            .inner_join(decks::table)
            .filter(cards::card_id.eq(card_id))
            .filter(decks::user_id.eq(user_id))
            .select(cards::deck_id)
            .first::<i32>(conn)
            .optional()?;

        if deck_id.is_some() {
            diesel::delete(cards::table.find(card_id)).execute(conn)?;
        }

        Ok(deck_id)
    }

    /// Cards across all of the user's decks
    pub fn count_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<i64, diesel::result::Error> {
        cards::table
            .inner_join(decks::table)
            .filter(decks::user_id.eq(user_id))
            .count()
            .get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::DEFAULT_DECK_COLOR;
    use crate::data::repositories::user::test_support::create_test_user;
    use crate::data::repositories::DeckRepository;
    use crate::database::test_connection;
    use chrono::{Duration, Utc};

    #[test]
    fn cards_come_back_in_creation_order_with_tags() {
        let mut conn = test_connection();
        let ana = create_test_user(&mut conn, "ana@example.com");
        let deck = DeckRepository::create(&mut conn, ana.user_id, "Histologia", "🔬", DEFAULT_DECK_COLOR).unwrap();
        let now = Utc::now().naive_utc();

        let tags = vec!["Tecidos".to_string()];
        let second = NewCard::new(deck.deck_id, "Segunda?", "Sim", &tags, now + Duration::seconds(1));
        let first = NewCard::new(deck.deck_id, " Primeira? ", "Sim ", &[], now);
        CardRepository::add(&mut conn, &second).unwrap();
        let added = CardRepository::add(&mut conn, &first).unwrap();
        assert_eq!(added.question, "Primeira?");
        assert_eq!(added.answer, "Sim");

        let cards = CardRepository::list_for_deck(&mut conn, deck.deck_id).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "Primeira?");
        assert_eq!(cards[1].tag_list(), vec!["Tecidos"]);
    }

    #[test]
    fn delete_and_count_are_scoped_to_owner() {
        let mut conn = test_connection();
        let ana = create_test_user(&mut conn, "ana@example.com");
        let bia = create_test_user(&mut conn, "bia@example.com");
        let deck = DeckRepository::create(&mut conn, ana.user_id, "Química", "⚗️", DEFAULT_DECK_COLOR).unwrap();
        let now = Utc::now().naive_utc();
        let card = CardRepository::add(&mut conn, &NewCard::new(deck.deck_id, "H2O?", "Água", &[], now)).unwrap();
        CardRepository::add(&mut conn, &NewCard::new(deck.deck_id, "NaCl?", "Sal", &[], now)).unwrap();

        assert_eq!(CardRepository::count_for_user(&mut conn, ana.user_id).unwrap(), 2);
        assert_eq!(CardRepository::count_for_user(&mut conn, bia.user_id).unwrap(), 0);

        assert_eq!(CardRepository::delete_owned(&mut conn, bia.user_id, card.card_id).unwrap(), None);
        assert_eq!(
            CardRepository::delete_owned(&mut conn, ana.user_id, card.card_id).unwrap(),
            Some(deck.deck_id)
        );
        assert_eq!(CardRepository::count_for_user(&mut conn, ana.user_id).unwrap(), 1);
    }
}
