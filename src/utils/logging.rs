/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{Quiz, QuizSummary};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug / info。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Wiki Quiz 启动");
    info!(
        "🤖 AI 生成: {}",
        if config.has_llm_credentials() {
            config.llm_model_name.as_str()
        } else {
            "未配置（规则生成）"
        }
    );
    info!("💾 存储目录: {}", config.store_folder);
    info!("{}", "=".repeat(60));
}

/// 打印测验概要
pub fn log_quiz(title: &str, quiz: &Quiz) {
    info!("\n{}", "─".repeat(60));
    info!("📖 {}", title);
    info!("📝 {}", quiz.summary);
    for (i, q) in quiz.questions.iter().enumerate() {
        info!("  {}. [{}] {}", i + 1, q.difficulty, truncate_text(&q.question, 80));
    }
    if !quiz.related_topics.is_empty() {
        info!("🔗 相关主题: {}", quiz.related_topics.join(", "));
    }
    info!("{}", "─".repeat(60));
}

/// 打印历史记录
pub fn log_history(history: &[QuizSummary]) {
    if history.is_empty() {
        info!("暂无历史记录");
        return;
    }

    info!("📚 共 {} 条历史记录", history.len());
    for item in history {
        info!("  {}", item);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
