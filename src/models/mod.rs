pub mod question;
pub mod record;

pub use question::{ArticleContent, Difficulty, Question, Quiz, OPTIONS_PER_QUESTION};
pub use record::{QuizSummary, StoredQuiz};
