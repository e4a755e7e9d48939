//! Source Loader Port - 输入源获取抽象

use async_trait::async_trait;
use thiserror::Error;

/// 输入源获取错误
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}, please use .txt files")]
    UnsupportedFormat(String),

    #[error("Input is empty: {0}")]
    Empty(String),

    #[error("Could not extract video id from URL: {0}")]
    InvalidVideoUrl(String),

    #[error("No transcript available for video {0}")]
    NoTranscript(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 输入源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    LocalFile,
    WebPage,
    Video,
}

impl SourceKind {
    /// 根据输入字符串判断类型
    pub fn detect(source: &str) -> Self {
        if source.contains("youtube.com") || source.contains("youtu.be") {
            SourceKind::Video
        } else if source.starts_with("http://") || source.starts_with("https://") {
            SourceKind::WebPage
        } else {
            SourceKind::LocalFile
        }
    }
}

/// Source Loader Port
///
/// 把输入源标识解析为原始文本
#[async_trait]
pub trait SourceLoaderPort: Send + Sync {
    async fn load(&self, source: &str) -> Result<String, SourceError>;
}
