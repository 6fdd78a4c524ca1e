pub mod flow_stage;
pub mod quiz_flow;

pub use flow_stage::FlowStage;
pub use quiz_flow::{QuizFlow, QuizOutcome, MAX_QUESTIONS, MIN_QUESTIONS};
