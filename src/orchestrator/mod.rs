//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (命令分发、持久化)
//!     ↓
//! workflow::QuizFlow (处理单个 URL)
//!     ↓
//! services (能力层：validate / extract / generate / store)
//!     ↓
//! infrastructure (基础设施：PageFetcher / ChatModel)
//! ```

pub mod app;

pub use app::{App, Cli, Command};
