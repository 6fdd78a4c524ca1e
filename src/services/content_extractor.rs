//! 正文抽取 - 业务能力层
//!
//! 只负责"抓取页面并归约为 {title, content}"，不关心测验如何生成
//!
//! 抽取规则：
//! 1. 标题取 `h1.firstHeading`，找不到时退回 `h1#firstHeading`
//! 2. 正文容器为 `div#mw-content-text`
//! 3. 容器内所有 `<p>` 按文档顺序收集，去掉首尾空白后长度 ≤ 50 的段落丢弃
//! 4. 段落之间以空行连接，超过 5000 字符截断并追加 `...`

use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{QuizError, QuizResult};
use crate::infrastructure::PageFetcher;
use crate::models::ArticleContent;

/// 正文最大字符数
pub const MAX_CONTENT_CHARS: usize = 5000;
/// 段落最短字符数（不含），更短的视为导航/图注碎片
pub const MIN_PARAGRAPH_CHARS: usize = 50;
/// 截断标记
pub const TRUNCATION_MARKER: &str = "...";
/// 段落分隔符
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

const TITLE_SELECTOR: &str = "h1.firstHeading";
const TITLE_FALLBACK_SELECTOR: &str = "h1#firstHeading";
const CONTENT_SELECTOR: &str = "div#mw-content-text";
const PARAGRAPH_SELECTOR: &str = "p";

/// 正文抽取服务
///
/// 每次 `extract` 只发起一次请求，不做重试。
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl ContentExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// 抓取并抽取文章内容
    pub async fn extract(&self, url: &str) -> QuizResult<ArticleContent> {
        let page = self
            .fetcher
            .get(url)
            .await
            .map_err(|e| QuizError::fetch(url, format!("{:#}", e)))?;

        if !page.is_success() {
            return Err(QuizError::fetch(url, format!("HTTP {}", page.status)));
        }

        let article = parse_article(&page.body, url)?;

        info!(
            "✓ 抽取完成: {} ({} 字符)",
            article.title,
            article.content.chars().count()
        );

        Ok(article)
    }
}

/// 从页面 HTML 中抽取文章内容（纯函数，不访问网络）
pub fn parse_article(html: &str, url: &str) -> QuizResult<ArticleContent> {
    let document = Html::parse_document(html);

    let title = find_title(&document)?;

    let content_selector = selector(CONTENT_SELECTOR)?;
    let container = document
        .select(&content_selector)
        .next()
        .ok_or_else(|| QuizError::parse("找不到文章正文容器"))?;

    let paragraphs = collect_paragraphs(container)?;
    debug!("保留段落数: {}", paragraphs.len());

    if paragraphs.is_empty() {
        return Err(QuizError::EmptyContent {
            url: url.to_string(),
        });
    }

    let content = truncate_content(&paragraphs.join(PARAGRAPH_SEPARATOR));

    Ok(ArticleContent { title, content })
}

fn find_title(document: &Html) -> QuizResult<String> {
    for raw in [TITLE_SELECTOR, TITLE_FALLBACK_SELECTOR] {
        let sel = selector(raw)?;
        if let Some(heading) = document.select(&sel).next() {
            let title = element_text(heading);
            if !title.is_empty() {
                return Ok(title);
            }
        }
    }

    Err(QuizError::parse("找不到文章标题"))
}

fn collect_paragraphs(container: ElementRef<'_>) -> QuizResult<Vec<String>> {
    let paragraph_selector = selector(PARAGRAPH_SELECTOR)?;

    Ok(container
        .select(&paragraph_selector)
        .map(element_text)
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn selector(raw: &str) -> QuizResult<Selector> {
    Selector::parse(raw).map_err(|e| QuizError::parse(format!("选择器 {} 无效: {:?}", raw, e)))
}

/// 按字符截断正文，被截断时追加标记
pub fn truncate_content(content: &str) -> String {
    if content.chars().count() > MAX_CONTENT_CHARS {
        content.chars().take(MAX_CONTENT_CHARS).collect::<String>() + TRUNCATION_MARKER
    } else {
        content.to_string()
    }
}
