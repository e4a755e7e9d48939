//! Text Generator Port - 文本生成（LLM）抽象

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key missing: {0}")]
    MissingApiKey(String),

    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 单次生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

/// Text Generator Port
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 单次请求/响应
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
