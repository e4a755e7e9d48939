//! Podcast Context - 最终产物与统计

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 一次运行的统计
///
/// 无论成功失败都会被汇总并记录日志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// 解析出的对话行数
    pub total_lines: usize,
    pub synthesized_count: usize,
    pub failed_count: usize,
    /// 因格式错误被跳过的行数
    pub skipped_count: usize,
    /// 取消后未派发的行数
    pub not_attempted: usize,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total={}, synthesized={}, failed={}, skipped={}, not_attempted={}",
            self.total_lines,
            self.synthesized_count,
            self.failed_count,
            self.skipped_count,
            self.not_attempted
        )
    }
}

/// 合成完成的播客文件，流水线唯一的持久产物
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastArtifact {
    pub path: PathBuf,
    pub total_lines: usize,
    pub synthesized_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    pub created_at: DateTime<Utc>,
}

impl PodcastArtifact {
    pub fn new(path: PathBuf, stats: &RunStats) -> Self {
        Self {
            path,
            total_lines: stats.total_lines,
            synthesized_count: stats.synthesized_count,
            failed_count: stats.failed_count,
            skipped_count: stats.skipped_count,
            created_at: Utc::now(),
        }
    }
}
