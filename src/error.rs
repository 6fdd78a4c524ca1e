use thiserror::Error;

/// 测验生成流程的终止性错误
///
/// 校验和抽取阶段的失败都会直接返回给调用方，不会进入兜底生成。
#[derive(Debug, Error)]
pub enum QuizError {
    /// URL 不是维基百科文章地址
    #[error("无效的维基百科 URL: {url}")]
    InvalidUrl { url: String },

    /// 题目数量超出允许范围
    #[error("题目数量 {requested} 超出范围 [{min}, {max}]")]
    InvalidQuestionCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// 网络请求失败、超时或返回非 2xx 状态
    #[error("获取页面失败 ({url}): {reason}")]
    Fetch { url: String, reason: String },

    /// 页面中找不到标题或正文容器
    #[error("页面解析失败: {reason}")]
    Parse { reason: String },

    /// 过滤后没有任何段落
    #[error("文章正文为空: {url}")]
    EmptyContent { url: String },
}

impl QuizError {
    /// 稳定的错误类别名称，供边界层区分
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::InvalidUrl { .. } => "InvalidURL",
            QuizError::InvalidQuestionCount { .. } => "InvalidQuestionCount",
            QuizError::Fetch { .. } => "FetchError",
            QuizError::Parse { .. } => "ParseError",
            QuizError::EmptyContent { .. } => "EmptyContentError",
        }
    }

    /// 建议的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            QuizError::Fetch { .. } => 502,
            _ => 400,
        }
    }
}

/// AI 生成阶段的错误，全部由流程层吸收并转入兜底生成
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 未配置凭据或客户端
    #[error("AI 生成不可用: {reason}")]
    AiUnavailable { reason: String },

    /// 模型调用失败或返回内容不满足结构约定
    #[error("AI 返回结果无效: {reason}")]
    AiResponse { reason: String },
}

/// 测验存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("测验 {id} 不存在")]
    NotFound { id: u64 },

    #[error("存储文件读写失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML 序列化失败: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("TOML 解析失败 ({path}): {source}")]
    Deserialize {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("测验数据 JSON 处理失败: {0}")]
    Json(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl QuizError {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        QuizError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        QuizError::Parse {
            reason: reason.into(),
        }
    }
}

impl GenerationError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        GenerationError::AiUnavailable {
            reason: reason.into(),
        }
    }

    pub fn response(reason: impl std::fmt::Display) -> Self {
        GenerationError::AiResponse {
            reason: reason.to_string(),
        }
    }
}

impl StoreError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 测验流程结果类型
pub type QuizResult<T> = Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = [
            QuizError::InvalidUrl {
                url: "x".to_string(),
            },
            QuizError::InvalidQuestionCount {
                requested: 3,
                min: 5,
                max: 10,
            },
            QuizError::fetch("u", "timeout"),
            QuizError::parse("no title"),
            QuizError::EmptyContent {
                url: "u".to_string(),
            },
        ];

        let kinds: std::collections::HashSet<&str> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
        assert_eq!(QuizError::fetch("u", "x").status_code(), 502);
        assert_eq!(QuizError::parse("x").status_code(), 400);
    }
}
