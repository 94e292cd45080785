pub mod api_models;
pub mod auth_models;
pub mod card_models;
pub mod deck_models;
pub mod generate_models;
pub mod profile_models;
pub mod srs_models;
pub mod study_models;
pub mod user_models;

pub use api_models::ApiError;
pub use auth_models::{LoginError, LoginForm, RegisterError, RegisterForm};
pub use card_models::{Card, CardView, CreateCardRequest, NewCard};
pub use deck_models::{
    ApiResponse, CreateDeckRequest, Deck, DeckSummary, DeckWithCards, NewDeck,
    DEFAULT_DECK_COLOR, DEFAULT_DECK_EMOJI, GENERATED_DECK_EMOJI,
};
pub use generate_models::{
    clamp_quantity, GenerateResponse, GenerateTextRequest, MAX_DECK_TITLE_CHARS,
};
pub use profile_models::{NewProfile, Profile, ProfileView, UpdateProfileRequest, DEFAULT_STUDY_FOCUS};
pub use srs_models::{CardReview, NewCardReview};
pub use study_models::{AnswerRequest, NewStudyLog, StartStudyRequest, StudyLog};
pub use user_models::{NewUser, User};
