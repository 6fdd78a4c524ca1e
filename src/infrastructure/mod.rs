pub mod http_fetcher;
pub mod llm_client;

pub use http_fetcher::{FetchedPage, HttpFetcher, PageFetcher, BROWSER_USER_AGENT};
pub use llm_client::{ChatModel, OpenAiChatModel};
