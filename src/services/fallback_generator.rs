//! 规则兜底生成 - 业务能力层
//!
//! 不依赖任何外部服务，只根据正文和标题构造测验。
//! 输出完全由输入决定，并且永远返回恰好 `count` 道题。
//!
//! 生成步骤：
//! 1. 摘要：按句号切分，取前两句
//! 2. 段落题：前 `min(count, 段落数)` 个段落中，长度超过 100 的每段出一道题
//! 3. 补齐：不足 `count` 时追加以标题为答案的通用题
//! 4. 相关主题：扫描前 500 个词中首字母大写的词

use async_trait::async_trait;
use tracing::debug;

use crate::error::GenerationError;
use crate::models::{Difficulty, Question, Quiz};
use crate::services::quiz_generator::QuizGenerator;

/// 段落题的最短段落长度（不含）
pub const MIN_PARAGRAPH_QUESTION_CHARS: usize = 100;

const PARAGRAPH_DISTRACTORS: [&str; 3] = [
    "This is not mentioned in the article",
    "The article discusses something else",
    "None of the above",
];

/// 补齐题的干扰项；标题与前三项之一重合时用最后一项顶替
const PADDING_DISTRACTORS: [&str; 4] = [
    "Something else",
    "Not specified",
    "Multiple topics",
    "None of these",
];

const TOPIC_SCAN_TOKENS: usize = 500;
const MAX_SCANNED_TOPICS: usize = 5;
const MIN_TOPICS: usize = 3;
const MAX_TOPICS: usize = 7;
const MIN_TOPIC_CHARS: usize = 3;

/// 规则生成测验
pub fn generate_fallback(content: &str, title: &str, count: usize) -> Quiz {
    let summary = build_summary(content, title);

    let mut questions = Vec::with_capacity(count);

    let paragraphs: Vec<&str> = content.split("\n\n").collect();
    for (position, paragraph) in paragraphs.iter().take(count).enumerate() {
        if paragraph.trim().chars().count() > MIN_PARAGRAPH_QUESTION_CHARS {
            let difficulty = Difficulty::cycle(questions.len());
            questions.push(paragraph_question(position + 1, title, difficulty));
        }
    }

    let from_paragraphs = questions.len();
    while questions.len() < count {
        questions.push(padding_question(title));
    }

    debug!(
        "兜底生成: 段落题 {} 道, 补齐题 {} 道",
        from_paragraphs,
        count - from_paragraphs
    );

    Quiz {
        summary,
        questions,
        related_topics: related_topics(content, title),
    }
}

/// 取前两个句子片段作为摘要
fn build_summary(content: &str, title: &str) -> String {
    let sentences: Vec<&str> = content
        .split('.')
        .take(2)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        return format!("This article is about {}.", title);
    }

    let mut summary = sentences.join(". ");
    summary.push('.');
    summary
}

fn paragraph_question(ordinal: usize, title: &str, difficulty: Difficulty) -> Question {
    let answer = format!("Information from paragraph {}", ordinal);

    let mut options = Vec::with_capacity(4);
    options.push(answer.clone());
    options.extend(PARAGRAPH_DISTRACTORS.iter().map(|s| s.to_string()));

    Question {
        question: format!("What is mentioned about {} in the article?", title),
        options,
        correct_answer: answer,
        explanation: Some(format!(
            "This information is found in the article content about {}.",
            title
        )),
        difficulty,
    }
}

fn padding_question(title: &str) -> Question {
    let mut options = vec![title.to_string()];
    options.extend(
        PADDING_DISTRACTORS
            .iter()
            .filter(|d| **d != title)
            .take(3)
            .map(|s| s.to_string()),
    );

    Question {
        question: "What is the main topic of this article?".to_string(),
        options,
        correct_answer: title.to_string(),
        explanation: Some(format!("The article is about {}.", title)),
        difficulty: Difficulty::Easy,
    }
}

/// 从正文开头挑选首字母大写的词作为相关主题
///
/// 词两端的标点会被去掉；标题本身以及标题中的单词不计入。
fn related_topics(content: &str, title: &str) -> Vec<String> {
    let title_words: Vec<&str> = title.split_whitespace().collect();
    let mut topics: Vec<String> = Vec::new();

    for token in content.split_whitespace().take(TOPIC_SCAN_TOKENS) {
        if topics.len() >= MAX_SCANNED_TOPICS {
            break;
        }

        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);

        if !starts_upper
            || word.chars().count() <= MIN_TOPIC_CHARS
            || word == title
            || title_words.contains(&word)
            || topics.iter().any(|t| t == word)
        {
            continue;
        }

        topics.push(word.to_string());
    }

    if topics.len() < MIN_TOPICS {
        topics.push(format!("{} history", title));
        topics.push(format!("{} applications", title));
        topics.push("Related concepts".to_string());
    }

    topics.truncate(MAX_TOPICS);
    topics
}

/// 规则生成器，作为 `QuizGenerator` 的兜底实现
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackQuizGenerator;

impl FallbackQuizGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuizGenerator for FallbackQuizGenerator {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    async fn generate(
        &self,
        content: &str,
        title: &str,
        count: usize,
    ) -> Result<Quiz, GenerationError> {
        Ok(generate_fallback(content, title, count))
    }
}
