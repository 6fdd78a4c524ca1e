//! 流程阶段
//!
//! Validating → Extracting → Generating(AI) → Done
//!                                   └─失败→ Generating(Fallback) → Done

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Validating,
    Extracting,
    GeneratingAi,
    GeneratingFallback,
    Done,
}

impl Display for FlowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FlowStage::Validating => "校验",
            FlowStage::Extracting => "抽取",
            FlowStage::GeneratingAi => "AI 生成",
            FlowStage::GeneratingFallback => "兜底生成",
            FlowStage::Done => "完成",
        };
        write!(f, "[{}]", label)
    }
}
