//! AI 测验生成 - 业务能力层
//!
//! 只负责"让模型出题并校验结构"，失败时由流程层决定是否兜底
//!
//! 模型返回的内容可能被包在 markdown 代码块里，解析前先剥掉代码块；
//! 没有代码块时直接使用原文。

use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::GenerationError;
use crate::infrastructure::{ChatModel, OpenAiChatModel};
use crate::models::Quiz;
use crate::services::quiz_generator::QuizGenerator;
use crate::utils::logging::truncate_text;

/// 提示词中正文的最大字符数
pub const PROMPT_CONTENT_CHARS: usize = 4000;
/// 相关主题最多保留条数
pub const MAX_RELATED_TOPICS: usize = 7;

const SYSTEM_MESSAGE: &str =
    "You are an expert quiz generator. You always answer with a single JSON object and nothing else.";

/// AI 测验生成服务
///
/// 模型客户端由构造函数注入；为 `None` 时 `generate` 返回 `AiUnavailable`。
pub struct AiQuizGenerator {
    model: Option<Arc<dyn ChatModel>>,
}

impl AiQuizGenerator {
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { model }
    }

    /// 根据配置创建；没有凭据时生成器处于不可用状态
    pub fn from_config(config: &Config) -> Self {
        let model = config
            .llm_api_key
            .as_deref()
            .filter(|_| config.has_llm_credentials())
            .map(|key| {
                let client = OpenAiChatModel::new(
                    key,
                    &config.llm_api_base_url,
                    config.llm_model_name.clone(),
                )
                .with_system_message(SYSTEM_MESSAGE);
                Arc::new(client) as Arc<dyn ChatModel>
            });

        Self::new(model)
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }
}

#[async_trait]
impl QuizGenerator for AiQuizGenerator {
    fn name(&self) -> &'static str {
        "ai"
    }

    async fn generate(
        &self,
        content: &str,
        title: &str,
        count: usize,
    ) -> Result<Quiz, GenerationError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| GenerationError::unavailable("未配置 API 凭据"))?;

        let prompt = build_prompt(content, title, count);
        debug!("AI 出题提示词长度: {} 字符", prompt.len());

        let response = model
            .complete(&prompt)
            .await
            .map_err(|e| GenerationError::response(format!("模型调用失败: {:#}", e)))?;

        debug!("模型响应: {}", truncate_text(&response, 200));

        let quiz = parse_quiz_response(&response, count)?;
        info!("✓ AI 生成 {} 道题目", quiz.questions.len());

        Ok(quiz)
    }
}

/// 构建出题提示词
pub fn build_prompt(content: &str, title: &str, count: usize) -> String {
    let excerpt: String = content.chars().take(PROMPT_CONTENT_CHARS).collect();

    format!(
        r#"Based on the following Wikipedia article, create a quiz with exactly {count} multiple-choice questions.

Article Title: {title}

Article Content:
{excerpt}

Generate a JSON response with the following structure:
{{
    "summary": "A concise 2-3 sentence summary of the article",
    "questions": [
        {{
            "question": "The question text",
            "options": ["Option A", "Option B", "Option C", "Option D"],
            "correct_answer": "The correct option text (must match one of the options exactly)",
            "explanation": "Brief explanation of why this is correct",
            "difficulty": "easy | medium | hard"
        }}
    ],
    "related_topics": ["Topic 1", "Topic 2", "Topic 3", "Topic 4", "Topic 5"]
}}

Requirements:
- Generate exactly {count} questions
- Each question must have exactly 4 distinct options
- Mix easy, medium and hard questions instead of using one difficulty
- Ensure correct_answer matches one of the options exactly
- Suggest 5 to 7 related Wikipedia topics
- Return ONLY the JSON, no additional text."#
    )
}

/// 剥掉 markdown 代码块，取出最内层的 JSON 对象文本
pub fn extract_payload(response: &str) -> &str {
    let mut payload = response.trim();

    if let Ok(re) = Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)\s*```") {
        if let Some(inner) = re.captures(payload).and_then(|c| c.get(1)) {
            payload = inner.as_str();
        }
    }

    match (payload.find('{'), payload.rfind('}')) {
        (Some(start), Some(end)) if start < end => &payload[start..=end],
        _ => payload,
    }
}

/// 解析并校验模型响应
pub fn parse_quiz_response(response: &str, count: usize) -> Result<Quiz, GenerationError> {
    let payload = extract_payload(response);

    let mut quiz: Quiz = serde_json::from_str(payload)
        .map_err(|e| GenerationError::response(format!("JSON 解析失败: {}", e)))?;

    if quiz.summary.trim().is_empty() {
        return Err(GenerationError::response("summary 为空"));
    }

    if quiz.questions.len() != count {
        return Err(GenerationError::response(format!(
            "题目数量为 {}，要求 {}",
            quiz.questions.len(),
            count
        )));
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        question
            .check_structure()
            .map_err(|reason| GenerationError::response(format!("第 {} 题: {}", index + 1, reason)))?;
    }

    quiz.related_topics.truncate(MAX_RELATED_TOPICS);

    Ok(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn question_json(n: usize, difficulty: &str) -> String {
        format!(
            r#"{{"question":"Q{n}?","options":["A{n}","B{n}","C{n}","D{n}"],"correct_answer":"B{n}","explanation":"because","difficulty":"{difficulty}"}}"#
        )
    }

    fn quiz_json(count: usize) -> String {
        let questions: Vec<String> = (0..count)
            .map(|n| question_json(n, ["easy", "medium", "hard"][n % 3]))
            .collect();
        format!(
            r#"{{"summary":"Short summary.","questions":[{}],"related_topics":["A","B","C","D","E","F","G","H"]}}"#,
            questions.join(",")
        )
    }

    #[test]
    fn test_extract_payload_plain() {
        assert_eq!(extract_payload("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_extract_payload_json_fence() {
        let response = "Here you go:\n```json\n{\"a\": 1}\n```\nEnjoy!";
        assert_eq!(extract_payload(response), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_payload_bare_fence() {
        let response = "```\n{\"a\": {\"b\": 2}}\n```";
        assert_eq!(extract_payload(response), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn test_extract_payload_prose_around_object() {
        assert_eq!(extract_payload("Sure! {\"a\":1} Hope it helps"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_valid_response() {
        let response = format!("```json\n{}\n```", quiz_json(5));
        let quiz = parse_quiz_response(&response, 5).unwrap();

        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.questions[2].difficulty, Difficulty::Hard);
        assert_eq!(quiz.related_topics.len(), MAX_RELATED_TOPICS);
    }

    #[test]
    fn test_mixed_case_difficulty_is_accepted() {
        let questions: Vec<String> = ["Easy", "MEDIUM", "Hard", "unknown", "easy"]
            .iter()
            .enumerate()
            .map(|(n, d)| question_json(n, d))
            .collect();
        let response = format!(
            r#"{{"summary":"Short summary.","questions":[{}]}}"#,
            questions.join(",")
        );

        let quiz = parse_quiz_response(&response, 5).unwrap();
        assert_eq!(quiz.questions[0].difficulty, Difficulty::Easy);
        assert_eq!(quiz.questions[2].difficulty, Difficulty::Hard);
        assert_eq!(quiz.questions[3].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_missing_required_keys() {
        let no_summary = r#"{"questions":[]}"#;
        assert!(matches!(
            parse_quiz_response(no_summary, 0),
            Err(GenerationError::AiResponse { .. })
        ));

        let no_questions = r#"{"summary":"x"}"#;
        assert!(parse_quiz_response(no_questions, 0).is_err());
    }

    #[test]
    fn test_related_topics_optional() {
        let response = format!(r#"{{"summary":"S.","questions":[{}]}}"#, question_json(0, "easy"));
        let quiz = parse_quiz_response(&response, 1).unwrap();
        assert!(quiz.related_topics.is_empty());
    }

    #[test]
    fn test_wrong_question_count() {
        assert!(parse_quiz_response(&quiz_json(4), 5).is_err());
    }

    #[test]
    fn test_answer_not_in_options() {
        let response = r#"{"summary":"S.","questions":[{"question":"Q","options":["a","b","c","d"],"correct_answer":"e"}]}"#;
        assert!(parse_quiz_response(response, 1).is_err());
    }

    #[test]
    fn test_not_json() {
        assert!(parse_quiz_response("I cannot help with that.", 5).is_err());
    }

    #[test]
    fn test_prompt_limits_content() {
        let content = "x".repeat(PROMPT_CONTENT_CHARS + 500);
        let prompt = build_prompt(&content, "Rust", 7);

        assert!(prompt.contains("exactly 7 multiple-choice questions"));
        assert!(prompt.contains("Article Title: Rust"));
        assert!(!prompt.contains(&"x".repeat(PROMPT_CONTENT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_unavailable_without_model() {
        let generator = AiQuizGenerator::new(None);
        assert!(!generator.is_available());

        let result = generator.generate("content", "Title", 5).await;
        assert!(matches!(result, Err(GenerationError::AiUnavailable { .. })));
    }

    #[test]
    fn test_from_config_without_key() {
        let generator = AiQuizGenerator::from_config(&Config::default());
        assert!(!generator.is_available());
    }
}
