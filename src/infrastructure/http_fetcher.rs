//! 页面抓取 - 基础设施层
//!
//! 只暴露"GET 一个页面"的能力，不认识文章/测验

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 模拟浏览器的 User-Agent
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 抓取结果
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 页面抓取能力
///
/// 错误只表示网络层失败（连接、超时、读取响应体）；
/// 非 2xx 状态码原样放在 `FetchedPage::status` 里由调用方判断。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedPage>;
}

/// 基于 reqwest 的抓取实现
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// 创建新的抓取器，超时时间对整个请求生效
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()
            .context("创建 HTTP 客户端失败")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("请求失败: {}", url))?;

        let status = response.status().as_u16();
        let body = response.text().await.context("读取响应内容失败")?;

        debug!("响应状态: {}, 内容长度: {} 字节", status, body.len());

        Ok(FetchedPage { status, body })
    }
}
