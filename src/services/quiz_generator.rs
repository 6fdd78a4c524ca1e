use async_trait::async_trait;

use crate::error::GenerationError;
use crate::models::Quiz;

/// 测验生成能力
///
/// 流程层只依赖这个接口，运行时在 AI 实现与规则实现之间切换，
/// 不检查具体类型。
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// 实现名称（仅用于日志）
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        content: &str,
        title: &str,
        count: usize,
    ) -> Result<Quiz, GenerationError>;
}
