use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::question::Quiz;

/// 持久化的测验记录（一条记录对应存储目录下的一个 TOML 文件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuiz {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Local>,
    /// 截断后的原始正文
    #[serde(default)]
    pub scraped_content: String,
    /// 序列化后的 Quiz（JSON）
    pub full_quiz_data: String,
}

impl StoredQuiz {
    /// 反序列化出完整测验
    pub fn quiz(&self) -> serde_json::Result<Quiz> {
        Quiz::from_json(&self.full_quiz_data)
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id,
            url: self.url.clone(),
            title: self.title.clone(),
            created_at: self.date_generated,
        }
    }
}

/// 历史列表中的简要信息（不含题目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub created_at: DateTime<Local>,
}

impl std::fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}) [{}]",
            self.id,
            self.title,
            self.url,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
