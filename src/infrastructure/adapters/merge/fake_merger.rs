//! Fake Merger - 用于测试的拼接器
//!
//! 读取清单，按顺序把片段字节拼到输出文件，并记录每次拼接的路径顺序

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::application::ports::{AudioMergerPort, MergeFailure, MergeOutput, MergeRequest};

/// 解析 concat demuxer 列表（`file '<path>'`）
pub fn parse_concat_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("file '"))
        .filter_map(|rest| rest.strip_suffix('\''))
        .map(|quoted| PathBuf::from(quoted.replace(r"'\''", "'")))
        .collect()
}

pub struct FakeMerger {
    failure: Option<String>,
    merged: Mutex<Vec<Vec<PathBuf>>>,
}

impl Default for FakeMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeMerger {
    pub fn new() -> Self {
        Self {
            failure: None,
            merged: Mutex::new(Vec::new()),
        }
    }

    /// 每次合并都失败，stderr 为给定内容
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            failure: Some(stderr.into()),
            merged: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.merged.lock().map(|m| m.len()).unwrap_or_default()
    }

    /// 每次调用时清单里的路径
    pub fn merged_paths(&self) -> Vec<Vec<PathBuf>> {
        self.merged.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// 每次调用时清单里的片段 index（从 `segment_<index>` 文件名解析）
    pub fn merged_indices(&self) -> Vec<Vec<usize>> {
        self.merged_paths()
            .iter()
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(|p| p.file_stem()?.to_str()?.strip_prefix("segment_")?.parse().ok())
                    .collect()
            })
            .collect()
    }
}

#[async_trait]
impl AudioMergerPort for FakeMerger {
    async fn merge(&self, request: &MergeRequest) -> Result<MergeOutput, MergeFailure> {
        let content = tokio::fs::read_to_string(&request.manifest_path)
            .await
            .map_err(|e| MergeFailure::IoError(e.to_string()))?;
        let paths = parse_concat_list(&content);

        if let Ok(mut merged) = self.merged.lock() {
            merged.push(paths.clone());
        }

        if let Some(stderr) = &self.failure {
            return Err(MergeFailure::ToolFailed {
                exit_code: Some(1),
                stderr: stderr.clone(),
            });
        }

        let mut joined = Vec::new();
        for path in &paths {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| MergeFailure::IoError(format!("{}: {}", path.display(), e)))?;
            joined.extend_from_slice(&bytes);
        }
        tokio::fs::write(&request.output_path, joined)
            .await
            .map_err(|e| MergeFailure::IoError(e.to_string()))?;

        Ok(MergeOutput::default())
    }
}
