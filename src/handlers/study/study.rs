use axum::extract::{Json, Path, State};
use chrono::{NaiveDateTime, Utc};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::Connection;
use serde::Serialize;

use crate::{
    data::models::{AnswerRequest, ApiError, ApiResponse, Card, NewStudyLog, StartStudyRequest},
    data::repositories::{CardRepository, DeckRepository, ReviewRepository, StudyLogRepository},
    database::DbPool,
    features::quiz::{AnswerOutcome, QuestionView, QuizCard, QuizEngine, QuizError, QuizSession, SessionSummary},
    features::srs::{self, Rating},
    utils,
};

/// Where the student stands in the current session.
#[derive(Debug, Serialize)]
pub struct StudyState {
    pub deck_id: i32,
    pub deck_title: String,
    pub question: Option<QuestionView>,
    pub finished: bool,
    pub summary: SessionSummary,
}

impl From<&QuizSession> for StudyState {
    fn from(quiz: &QuizSession) -> Self {
        StudyState {
            deck_id: quiz.deck_id,
            deck_title: quiz.deck_title.clone(),
            question: quiz.current_view(),
            finished: quiz.is_finished(),
            summary: quiz.summary(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub outcome: AnswerOutcome,
    pub next: Option<QuestionView>,
}

fn build_quiz(
    deck_id: i32,
    deck_title: String,
    cards: Vec<Card>,
    due: Option<&dyn Fn(i32) -> bool>,
    limit: Option<usize>,
) -> Result<QuizSession, QuizError> {
    let deck: Vec<QuizCard> = cards.into_iter().map(QuizCard::from).collect();
    if deck.is_empty() {
        return Err(QuizError::EmptyDeck);
    }

    let selected: Vec<QuizCard> = match due {
        Some(is_due) => deck.iter().filter(|card| is_due(card.id)).cloned().collect(),
        None => deck.clone(),
    };
    if selected.is_empty() {
        return Err(QuizError::NothingDue);
    }

    QuizEngine::build_session(deck_id, deck_title, &deck, selected, limit, &mut rand::rng())
}

#[axum::debug_handler]
pub async fn start_session(
    Path(deck_id): Path<i32>,
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(request): Json<StartStudyRequest>,
) -> Result<Json<StudyState>, ApiError> {
    let user_id = utils::require_user(&session).await?;

    let quiz = {
        let mut conn = pool.get()?;
        let deck = DeckRepository::find_owned(&mut conn, user_id, deck_id)?
            .ok_or(ApiError::NotFound("Deck"))?;
        let cards = CardRepository::list_for_deck(&mut conn, deck_id)?;

        if request.due_only {
            let reviews = ReviewRepository::for_deck(&mut conn, user_id, deck_id)?;
            let now = Utc::now().naive_utc();
            let is_due = |card_id: i32| srs::is_due(reviews.get(&card_id), now);
            build_quiz(deck_id, deck.title, cards, Some(&is_due), request.limit)?
        } else {
            build_quiz(deck_id, deck.title, cards, None, request.limit)?
        }
    };

    utils::store_quiz(&session, &quiz).await?;
    log::info!(
        "User {} started studying deck {} ({} cards)",
        user_id,
        deck_id,
        quiz.total()
    );

    Ok(Json(StudyState::from(&quiz)))
}

pub async fn current_question(session: tower_sessions::Session) -> Result<Json<StudyState>, ApiError> {
    utils::require_user(&session).await?;
    let quiz = utils::load_quiz(&session)
        .await?
        .ok_or(ApiError::NotFound("Study session"))?;

    Ok(Json(StudyState::from(&quiz)))
}

fn persist_answer(
    conn: &mut diesel::SqliteConnection,
    user_id: i32,
    deck_id: i32,
    card_id: i32,
    correct: bool,
    rating: Rating,
    now: NaiveDateTime,
) -> Result<(), DieselError> {
    conn.transaction(|conn| {
        StudyLogRepository::record(
            conn,
            &NewStudyLog {
                user_id,
                deck_id,
                card_id,
                correct,
                studied_at: now,
            },
        )?;
        ReviewRepository::record(conn, user_id, card_id, rating, now)?;
        DeckRepository::touch(conn, deck_id, now)
    })
}

#[axum::debug_handler]
pub async fn answer_question(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let mut quiz = utils::load_quiz(&session)
        .await?
        .ok_or(ApiError::NotFound("Study session"))?;

    let outcome = quiz.answer(request.choice)?;
    let rating = Rating::for_answer(outcome.correct, request.rating);

    {
        let mut conn = pool.get()?;
        let now = Utc::now().naive_utc();
        match persist_answer(&mut conn, user_id, quiz.deck_id, outcome.card_id, outcome.correct, rating, now) {
            Ok(()) => {}
            // card or deck removed while the session was running
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                log::warn!(
                    "Card {} no longer exists, answer by user {} not logged",
                    outcome.card_id,
                    user_id
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    utils::store_quiz(&session, &quiz).await?;

    Ok(Json(AnswerResponse {
        next: quiz.current_view(),
        outcome,
    }))
}

pub async fn abandon_session(session: tower_sessions::Session) -> Result<Json<ApiResponse>, ApiError> {
    utils::require_user(&session).await?;
    utils::clear_quiz(&session).await?;
    Ok(Json(ApiResponse::ok("Study session closed")))
}
