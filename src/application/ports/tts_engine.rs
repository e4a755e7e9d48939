//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色标识
    pub voice: String,
    /// 输出文件路径（由调用方决定）
    pub output_path: PathBuf,
}

/// TTS Engine Port
///
/// 外部语音合成能力的抽象接口。
/// 同一次运行中所有片段必须由同一引擎产出，保证编码/容器一致，
/// 否则后续的流拷贝拼接无效。
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成一段语音并写入 `request.output_path`
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), TtsError>;

    /// 检查引擎是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
