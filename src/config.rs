/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// API 凭据，为空时 AI 生成不可用，直接走兜底生成
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 抓取页面的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 测验存储目录
    pub store_folder: String,
    /// 未指定时生成的题目数量
    pub default_num_questions: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            request_timeout_secs: 10,
            store_folder: "quiz_store".to_string(),
            default_num_questions: 5,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("LLM_API_KEY")),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            store_folder: std::env::var("QUIZ_STORE_FOLDER").unwrap_or(default.store_folder),
            default_num_questions: std::env::var("DEFAULT_NUM_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_num_questions),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 是否配置了 AI 凭据
    pub fn has_llm_credentials(&self) -> bool {
        self.llm_api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
