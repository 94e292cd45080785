use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::data::models::{NewProfile, NewUser, RegisterError, User, DEFAULT_STUDY_FOCUS};
use crate::schema::{profiles, users};

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn verify_password(
        stored_hash: &str,
        input_password: &str,
    ) -> Result<bool, bcrypt::BcryptError> {
        verify(input_password, stored_hash)
    }

    /// Creates the user and its profile together.
    pub fn create_user(
        conn: &mut SqliteConnection,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<User, RegisterError> {
        Self::create_user_with_cost(conn, email, password, full_name, DEFAULT_COST)
    }

    pub(crate) fn create_user_with_cost(
        conn: &mut SqliteConnection,
        email: &str,
        password: &str,
        full_name: &str,
        cost: u32,
    ) -> Result<User, RegisterError> {
        let hashed_password = hash(password, cost)?;
        let now = Utc::now().naive_utc();

        let user = conn.transaction::<_, DieselError, _>(|conn| {
            let user = diesel::insert_into(users::table)
                .values(&NewUser {
                    email,
                    password: &hashed_password,
                    created_at: now,
                })
                .returning(User::as_returning())
                .get_result(conn)?;

            diesel::insert_into(profiles::table)
                .values(&NewProfile {
                    user_id: user.user_id,
                    full_name: full_name.trim(),
                    study_focus: DEFAULT_STUDY_FOCUS,
                    updated_at: now,
                })
                .execute(conn)?;

            Ok(user)
        });

        match user {
            Ok(user) => Ok(user),
            // lost a race with another registration for the same email
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(RegisterError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn email_exists(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(users::table.filter(users::email.eq(email)))).get_result(conn)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::create_test_user;
    use super::*;
    use crate::data::repositories::ProfileRepository;
    use crate::database::test_connection;

    #[test]
    fn created_user_can_log_in_and_has_profile() {
        let mut conn = test_connection();
        let user = create_test_user(&mut conn, "ana@example.com");

        let found = UserRepository::find_by_email(&mut conn, "ana@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, user.user_id);
        assert!(UserRepository::verify_password(&found.password, "password123").unwrap());
        assert!(!UserRepository::verify_password(&found.password, "wrong").unwrap());

        let profile = ProfileRepository::find(&mut conn, user.user_id).unwrap().unwrap();
        assert_eq!(profile.full_name, "Ana Souza");
        assert_eq!(profile.study_focus, "Geral");
    }

    #[test]
    fn duplicate_email_reports_email_taken() {
        let mut conn = test_connection();
        assert!(!UserRepository::email_exists(&mut conn, "bia@example.com").unwrap());
        create_test_user(&mut conn, "bia@example.com");
        assert!(UserRepository::email_exists(&mut conn, "bia@example.com").unwrap());

        let duplicate =
            UserRepository::create_user_with_cost(&mut conn, "bia@example.com", "password123", "Bia", 4);
        assert!(matches!(duplicate, Err(RegisterError::EmailTaken)));
    }
}
