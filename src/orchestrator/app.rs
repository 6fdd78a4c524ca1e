//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建生成流程和存储
//! 2. **命令分发**：generate / history / show / delete
//! 3. **持久化时机**：只有流程成功返回后才写入存储
//!
//! 单次生成内部的决策全部委托给 `workflow::QuizFlow`。

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use crate::config::Config;
use crate::models::{Question, StoredQuiz};
use crate::services::QuizStore;
use crate::utils::logging::{log_history, log_quiz, log_startup};
use crate::workflow::QuizFlow;

/// 命令行入口
#[derive(Debug, Parser)]
#[command(name = "wiki-quiz")]
#[command(about = "从维基百科文章生成选择题测验")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// 命令行命令
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// 从维基百科 URL 生成测验并保存
    Generate {
        url: String,
        /// 题目数量（5-10），缺省使用配置值
        num_questions: Option<usize>,
    },
    /// 列出历史记录
    History,
    /// 显示一条记录的完整测验
    Show { id: u64 },
    /// 删除一条记录
    Delete { id: u64 },
}

/// 对外输出的测验结构
#[derive(Debug, Serialize)]
struct QuizResponse {
    id: u64,
    wikipedia_url: String,
    title: String,
    summary: String,
    questions: Vec<Question>,
    related_topics: Vec<String>,
    created_at: DateTime<Local>,
}

impl QuizResponse {
    fn from_record(record: &StoredQuiz) -> Result<Self> {
        let quiz = record.quiz().context("存储的测验数据无法解析")?;
        Ok(Self {
            id: record.id,
            wikipedia_url: record.url.clone(),
            title: record.title.clone(),
            summary: quiz.summary,
            questions: quiz.questions,
            related_topics: quiz.related_topics,
            created_at: record.date_generated,
        })
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: QuizFlow,
    store: QuizStore,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let flow = QuizFlow::new(&config)?;
        let store = QuizStore::new(&config.store_folder);

        Ok(Self {
            config,
            flow,
            store,
        })
    }

    /// 执行命令
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Generate { url, num_questions } => {
                let count = num_questions.unwrap_or(self.config.default_num_questions);
                let record = self.generate(&url, count).await?;
                print_json(&QuizResponse::from_record(&record)?)
            }
            Command::History => {
                let history = self.store.list().await?;
                log_history(&history);
                print_json(&history)
            }
            Command::Show { id } => {
                let record = self.store.get(id).await?;
                print_json(&QuizResponse::from_record(&record)?)
            }
            Command::Delete { id } => {
                self.store.delete(id).await?;
                info!("✓ 测验 {} 已删除", id);
                Ok(())
            }
        }
    }

    /// 生成并保存；流程失败时不写入任何记录
    pub async fn generate(&self, url: &str, num_questions: usize) -> Result<StoredQuiz> {
        let outcome = self.flow.run(url, num_questions).await.map_err(|e| {
            error!("❌ [{}] {}", e.kind(), e);
            e
        })?;

        log_quiz(outcome.title(), &outcome.quiz);

        let record = self.store.save(url, &outcome.article, &outcome.quiz).await?;
        Ok(record)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
