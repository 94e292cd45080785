pub mod card;
pub mod deck;
pub mod profile;
pub mod review;
pub mod study_log;
pub mod user;

pub use card::CardRepository;
pub use deck::DeckRepository;
pub use profile::ProfileRepository;
pub use review::ReviewRepository;
pub use study_log::StudyLogRepository;
pub use user::UserRepository;
