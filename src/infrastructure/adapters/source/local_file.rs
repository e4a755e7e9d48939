//! 本地文本文件

use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::{SourceError, SourceLoaderPort};

/// 只接受 `.txt`（不区分大小写），UTF-8，去除首尾空白后非空
#[derive(Debug, Default, Clone)]
pub struct LocalFileLoader;

#[async_trait]
impl SourceLoaderPort for LocalFileLoader {
    async fn load(&self, source: &str) -> Result<String, SourceError> {
        let path = Path::new(source);
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| SourceError::IoError(e.to_string()))?
        {
            return Err(SourceError::FileNotFound(source.to_string()));
        }

        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if !is_txt {
            let ext = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            return Err(SourceError::UnsupportedFormat(ext));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::IoError(e.to_string()))?;
        let content = content.trim();
        if content.is_empty() {
            return Err(SourceError::Empty(source.to_string()));
        }

        Ok(content.to_string())
    }
}
