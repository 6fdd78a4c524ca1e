use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// 每道题的选项数量
pub const OPTIONS_PER_QUESTION: usize = 4;

/// 抽取后的文章内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub title: String,
    /// 纯文本，段落之间以空行分隔，已截断
    pub content: String,
}

/// 题目难度
///
/// 反序列化时不区分大小写；`null` 或无法识别的值按 `medium` 处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// 按题目序号循环取难度：easy → medium → hard
    pub fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// 宽松解析模型返回的难度文本
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Difficulty::from_label).unwrap_or_default())
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Question {
    /// 检查题目结构：恰好 4 个互不相同的选项，正确答案与其中一个完全一致
    pub fn check_structure(&self) -> Result<(), String> {
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "选项数量为 {}，应为 {}",
                self.options.len(),
                OPTIONS_PER_QUESTION
            ));
        }

        let unique: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        if unique.len() != self.options.len() {
            return Err("选项存在重复".to_string());
        }

        if !self.options.iter().any(|o| o == &self.correct_answer) {
            return Err(format!(
                "正确答案 '{}' 不在选项中",
                self.correct_answer
            ));
        }

        Ok(())
    }
}

/// 完整测验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub summary: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl Quiz {
    /// 序列化为 JSON 字符串（用于持久化）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
