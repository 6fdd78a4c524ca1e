//! 测验生成流程 - 流程层
//!
//! 核心职责：定义"一个 URL"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验 URL 和题目数量（失败即终止）
//! 2. 抓取并抽取正文（失败即终止）
//! 3. AI 生成 → 成功则返回
//! 4. AI 不可用或失败 → 规则兜底生成（只做一次，不会失败）
//!
//! 整个流程只返回结果，不做持久化。

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{QuizError, QuizResult};
use crate::infrastructure::{HttpFetcher, PageFetcher};
use crate::models::{ArticleContent, Quiz};
use crate::services::{
    generate_fallback, url_validator, AiQuizGenerator, ContentExtractor, FallbackQuizGenerator,
    QuizGenerator,
};
use crate::utils::logging::truncate_text;
use crate::workflow::flow_stage::FlowStage;

/// 允许的最少题目数
pub const MIN_QUESTIONS: usize = 5;
/// 允许的最多题目数
pub const MAX_QUESTIONS: usize = 10;

/// 流程输出：抽取到的文章和生成的测验
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub article: ArticleContent,
    pub quiz: Quiz,
}

impl QuizOutcome {
    pub fn title(&self) -> &str {
        &self.article.title
    }
}

/// 测验生成流程
///
/// - 编排 校验 → 抽取 → 生成
/// - 决定何时兜底
/// - 不持有跨请求的可变状态，可以被多个调用方同时使用
pub struct QuizFlow {
    extractor: ContentExtractor,
    generator: Box<dyn QuizGenerator>,
    fallback: Box<dyn QuizGenerator>,
}

impl QuizFlow {
    /// 按配置创建：reqwest 抓取 + AI 生成（无凭据时不可用）
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.request_timeout_secs))?;
        let generator = AiQuizGenerator::from_config(config);

        if !generator.is_available() {
            info!("未配置 LLM 凭据，将使用规则兜底生成");
        }

        Ok(Self::with_parts(Arc::new(fetcher), Box::new(generator)))
    }

    /// 使用自定义组件创建
    pub fn with_parts(fetcher: Arc<dyn PageFetcher>, generator: Box<dyn QuizGenerator>) -> Self {
        Self {
            extractor: ContentExtractor::new(fetcher),
            generator,
            fallback: Box::new(FallbackQuizGenerator::new()),
        }
    }

    /// 替换兜底生成器（默认为规则生成）
    pub fn with_fallback(mut self, fallback: Box<dyn QuizGenerator>) -> Self {
        self.fallback = fallback;
        self
    }

    pub async fn run(&self, url: &str, num_questions: usize) -> QuizResult<QuizOutcome> {
        // ========== 阶段 1: 校验 ==========
        info!("{} {}", FlowStage::Validating, url);

        if !url_validator::is_valid(url) {
            return Err(QuizError::InvalidUrl {
                url: url.to_string(),
            });
        }

        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&num_questions) {
            return Err(QuizError::InvalidQuestionCount {
                requested: num_questions,
                min: MIN_QUESTIONS,
                max: MAX_QUESTIONS,
            });
        }

        // ========== 阶段 2: 抽取 ==========
        info!("{} 🔍 正在抓取文章...", FlowStage::Extracting);
        let article = self.extractor.extract(url).await?;

        // ========== 阶段 3: 生成 ==========
        let quiz = self.generate(&article, num_questions).await;

        info!(
            "{} {}: {} 道题, 摘要: {}",
            FlowStage::Done,
            article.title,
            quiz.questions.len(),
            truncate_text(&quiz.summary, 60)
        );

        Ok(QuizOutcome { article, quiz })
    }

    /// AI 生成一次，失败则兜底一次；该阶段不会返回错误
    async fn generate(&self, article: &ArticleContent, count: usize) -> Quiz {
        info!(
            "{} 🤖 使用 {} 生成 {} 道题...",
            FlowStage::GeneratingAi,
            self.generator.name(),
            count
        );

        match self
            .generator
            .generate(&article.content, &article.title, count)
            .await
        {
            Ok(quiz) => quiz,
            Err(e) => {
                warn!(
                    "{} ⚠️ {}，改用 {} 生成",
                    FlowStage::GeneratingFallback,
                    e,
                    self.fallback.name()
                );
                self.fallback_quiz(article, count).await
            }
        }
    }

    /// 兜底生成；兜底实现本身出错时退回内置规则，保证总能产出测验
    async fn fallback_quiz(&self, article: &ArticleContent, count: usize) -> Quiz {
        match self
            .fallback
            .generate(&article.content, &article.title, count)
            .await
        {
            Ok(quiz) => quiz,
            Err(e) => {
                error!(
                    "{} ❌ {} 失败: {}，使用内置规则",
                    FlowStage::GeneratingFallback,
                    self.fallback.name(),
                    e
                );
                generate_fallback(&article.content, &article.title, count)
            }
        }
    }
}
