pub mod engine;

pub use engine::{AnswerOutcome, QuestionView, QuizCard, QuizEngine, QuizError, QuizSession, SessionSummary};
