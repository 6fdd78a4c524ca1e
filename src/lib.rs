//! # Wiki Quiz
//!
//! 把一篇维基百科文章转换成选择题测验
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `PageFetcher` - 页面抓取（reqwest）
//! - `ChatModel` - 生成式模型调用（async-openai）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `url_validator` - URL 校验
//! - `ContentExtractor` - 正文抽取
//! - `AiQuizGenerator` / `FallbackQuizGenerator` - 两种 `QuizGenerator` 实现
//! - `QuizStore` - 测验持久化
//!
//! ### ③ 流程层（Workflow）
//! - `QuizFlow` - 校验 → 抽取 → AI 生成（失败则兜底）
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 命令分发，流程成功后才持久化

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{GenerationError, QuizError, QuizResult, StoreError};
pub use models::{ArticleContent, Difficulty, Question, Quiz, QuizSummary, StoredQuiz};
pub use orchestrator::{App, Cli, Command};
pub use services::{generate_fallback, url_validator::is_valid, QuizGenerator, QuizStore};
pub use workflow::{QuizFlow, QuizOutcome};
