use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::data::models::{NewStudyLog, StudyLog};
use crate::schema::study_logs;

pub struct StudyLogRepository;

impl StudyLogRepository {
    pub fn record(conn: &mut SqliteConnection, log: &NewStudyLog) -> Result<(), diesel::result::Error> {
        diesel::insert_into(study_logs::table)
            .values(log)
            .execute(conn)?;
        Ok(())
    }

    /// `(correct, studied_at)` for every review the user has done
    pub fn outcomes_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<(bool, NaiveDateTime)>, diesel::result::Error> {
        study_logs::table
            .filter(study_logs::user_id.eq(user_id))
            .select((study_logs::correct, study_logs::studied_at))
            .load(conn)
    }

    /// Every review row of the user, oldest first
    pub fn for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<StudyLog>, diesel::result::Error> {
        study_logs::table
            .filter(study_logs::user_id.eq(user_id))
            .order((study_logs::studied_at.asc(), study_logs::log_id.asc()))
            .select(StudyLog::as_select())
            .load(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{NewCard, DEFAULT_DECK_COLOR};
    use crate::data::repositories::user::test_support::create_test_user;
    use crate::data::repositories::{CardRepository, DeckRepository};
    use crate::database::test_connection;
    use chrono::Utc;

    #[test]
    fn outcomes_are_per_user() {
        let mut conn = test_connection();
        let ana = create_test_user(&mut conn, "ana@example.com");
        let bia = create_test_user(&mut conn, "bia@example.com");
        let deck = DeckRepository::create(&mut conn, ana.user_id, "Física", "🧲", DEFAULT_DECK_COLOR).unwrap();
        let now = Utc::now().naive_utc();
        let card = CardRepository::add(&mut conn, &NewCard::new(deck.deck_id, "F = ?", "m·a", &[], now)).unwrap();

        for correct in [true, false, true] {
            StudyLogRepository::record(
                &mut conn,
                &NewStudyLog {
                    user_id: ana.user_id,
                    deck_id: deck.deck_id,
                    card_id: card.card_id,
                    correct,
                    studied_at: now,
                },
            )
            .unwrap();
        }

        let logs = StudyLogRepository::outcomes_for_user(&mut conn, ana.user_id).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs.iter().filter(|(ok, _)| *ok).count(), 2);
        assert!(StudyLogRepository::outcomes_for_user(&mut conn, bia.user_id).unwrap().is_empty());

        let rows = StudyLogRepository::for_user(&mut conn, ana.user_id).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.deck_id == deck.deck_id && row.card_id == card.card_id));
        assert_eq!(rows.iter().map(|row| row.correct).collect::<Vec<_>>(), vec![true, false, true]);
        assert!(StudyLogRepository::for_user(&mut conn, bia.user_id).unwrap().is_empty());
    }

    #[test]
    fn log_requires_an_existing_card() {
        let mut conn = test_connection();
        let ana = create_test_user(&mut conn, "ana@example.com");
        let result = StudyLogRepository::record(
            &mut conn,
            &NewStudyLog {
                user_id: ana.user_id,
                deck_id: 999,
                card_id: 999,
                correct: true,
                studied_at: Utc::now().naive_utc(),
            },
        );
        assert!(result.is_err());
    }
}
