pub mod ai_generator;
pub mod content_extractor;
pub mod fallback_generator;
pub mod quiz_generator;
pub mod quiz_store;
pub mod url_validator;

pub use ai_generator::AiQuizGenerator;
pub use content_extractor::ContentExtractor;
pub use fallback_generator::{generate_fallback, FallbackQuizGenerator};
pub use quiz_generator::QuizGenerator;
pub use quiz_store::QuizStore;
