//! Audio Merger Port - 无损拼接抽象
//!
//! 把清单中的片段按顺序流拷贝成一个文件（不重新编码）

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::CommandError;

/// 合并失败
#[derive(Debug, Error)]
pub enum MergeFailure {
    #[error("Merge tool exited with {exit_code:?}: {stderr}")]
    ToolFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Merge tool unavailable: {0}")]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    IoError(String),
}

impl MergeFailure {
    /// 工具的诊断输出（用于展示给用户）
    pub fn diagnostic(&self) -> String {
        match self {
            MergeFailure::ToolFailed { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}

/// 合并请求
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// 清单文件（每行一个绝对路径）
    pub manifest_path: PathBuf,
    /// 输出文件
    pub output_path: PathBuf,
}

/// 合并输出（工具日志）
#[derive(Debug, Clone, Default)]
pub struct MergeOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Audio Merger Port
#[async_trait]
pub trait AudioMergerPort: Send + Sync {
    async fn merge(&self, request: &MergeRequest) -> Result<MergeOutput, MergeFailure>;
}
