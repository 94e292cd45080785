use chrono::Utc;
use diesel::prelude::*;

use crate::data::models::{NewProfile, Profile};
use crate::schema::profiles;

pub struct ProfileRepository;

impl ProfileRepository {
    pub fn find(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Option<Profile>, diesel::result::Error> {
        profiles::table
            .find(user_id)
            .select(Profile::as_select())
            .first(conn)
            .optional()
    }

    /// Inserts the profile if the user has none yet, otherwise overwrites it.
    pub fn upsert(
        conn: &mut SqliteConnection,
        user_id: i32,
        full_name: &str,
        study_focus: &str,
    ) -> Result<Profile, diesel::result::Error> {
        let now = Utc::now().naive_utc();
        let full_name = full_name.trim();
        let study_focus = study_focus.trim();

        diesel::insert_into(profiles::table)
            .values(&NewProfile {
                user_id,
                full_name,
                study_focus,
                updated_at: now,
            })
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                profiles::full_name.eq(full_name),
                profiles::study_focus.eq(study_focus),
                profiles::updated_at.eq(now),
            ))
            .execute(conn)?;

        profiles::table
            .find(user_id)
            .select(Profile::as_select())
            .first(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::repositories::user::test_support::create_test_user;
    use crate::database::test_connection;

    #[test]
    fn upsert_updates_existing_profile() {
        let mut conn = test_connection();
        let user = create_test_user(&mut conn, "caio@example.com");

        let profile =
            ProfileRepository::upsert(&mut conn, user.user_id, "  Caio Lima ", "Medicina").unwrap();
        assert_eq!(profile.full_name, "Caio Lima");
        assert_eq!(profile.study_focus, "Medicina");

        let stored = ProfileRepository::find(&mut conn, user.user_id).unwrap().unwrap();
        assert_eq!(stored.study_focus, "Medicina");
    }

    #[test]
    fn upsert_creates_missing_profile() {
        let mut conn = test_connection();
        let user = create_test_user(&mut conn, "duda@example.com");
        diesel::delete(profiles::table.find(user.user_id))
            .execute(&mut conn)
            .unwrap();
        assert!(ProfileRepository::find(&mut conn, user.user_id).unwrap().is_none());

        ProfileRepository::upsert(&mut conn, user.user_id, "Duda", "Concursos").unwrap();
        assert!(ProfileRepository::find(&mut conn, user.user_id).unwrap().is_some());
    }
}
