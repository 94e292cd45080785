use tower_sessions::session::Error as SessionError;
use tower_sessions::Session;

use crate::data::models::ApiError;
use crate::features::quiz::QuizSession;

const USER_ID_KEY: &str = "user_id";
const USER_EMAIL_KEY: &str = "user_email";
const QUIZ_KEY: &str = "quiz_session";

pub async fn set_user_session(
    session: &Session,
    user_id: i32,
    email: &str,
) -> Result<(), SessionError> {
    // a login starts from an empty session, whoever was signed in before
    session.clear().await;
    session.cycle_id().await?;
    session.insert("logged_in", true).await?;
    session.insert(USER_ID_KEY, user_id).await?;
    session.insert(USER_EMAIL_KEY, email).await?;
    Ok(())
}

pub async fn is_logged_in(session: &Session) -> bool {
    session.get::<i32>(USER_ID_KEY).await.unwrap_or(None).is_some()
}

pub async fn get_current_user_id(session: &Session) -> Option<i32> {
    match session.get::<i32>(USER_ID_KEY).await {
        Ok(user_id) => user_id,
        Err(e) => {
            log::error!("Failed to get user_id from session: {}", e);
            None
        }
    }
}

pub async fn get_current_user_email(session: &Session) -> Option<String> {
    session.get::<String>(USER_EMAIL_KEY).await.unwrap_or(None)
}

/// The logged-in user's id, or `ApiError::Unauthorized`.
pub async fn require_user(session: &Session) -> Result<i32, ApiError> {
    get_current_user_id(session)
        .await
        .ok_or(ApiError::Unauthorized)
}

pub async fn store_quiz(session: &Session, quiz: &QuizSession) -> Result<(), SessionError> {
    session.insert(QUIZ_KEY, quiz).await
}

pub async fn load_quiz(session: &Session) -> Result<Option<QuizSession>, SessionError> {
    session.get::<QuizSession>(QUIZ_KEY).await
}

pub async fn clear_quiz(session: &Session) -> Result<(), SessionError> {
    session.remove::<QuizSession>(QUIZ_KEY).await?;
    Ok(())
}
