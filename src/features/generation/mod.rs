pub mod groq;
pub mod pdf;

pub use groq::{GeneratedCard, GenerationError, GroqClient, Language};
pub use pdf::PdfError;
