//! Podcast Context - 音频片段

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::script::DialogueLine;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("segment {index} already finished as {status}")]
    AlreadyFinished { index: usize, status: SegmentStatus },
}

/// 片段状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStatus {
    /// 等待合成
    Pending,
    /// 合成成功，文件存在且非空
    Synthesized,
    /// 合成失败
    Failed,
}

impl SegmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentStatus::Pending => "pending",
            SegmentStatus::Synthesized => "synthesized",
            SegmentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SegmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一行对话对应的音频片段
///
/// 不变量:
/// - 状态只能从 Pending 迁移一次（到 Synthesized 或 Failed）
#[derive(Debug, Clone)]
pub struct AudioSegment {
    index: usize,
    path: PathBuf,
    status: SegmentStatus,
    error_message: Option<String>,
}

impl AudioSegment {
    pub fn pending(line: &DialogueLine, path: PathBuf) -> Self {
        Self {
            index: line.index,
            path,
            status: SegmentStatus::Pending,
            error_message: None,
        }
    }

    pub fn mark_synthesized(&mut self) -> Result<(), SegmentError> {
        self.finish(SegmentStatus::Synthesized)
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) -> Result<(), SegmentError> {
        self.finish(SegmentStatus::Failed)?;
        self.error_message = Some(reason.into());
        Ok(())
    }

    fn finish(&mut self, status: SegmentStatus) -> Result<(), SegmentError> {
        if self.status != SegmentStatus::Pending {
            return Err(SegmentError::AlreadyFinished {
                index: self.index,
                status: self.status,
            });
        }
        self.status = status;
        Ok(())
    }

    // Getters
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> SegmentStatus {
        self.status
    }

    pub fn is_synthesized(&self) -> bool {
        self.status == SegmentStatus::Synthesized
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::Speaker;

    fn segment(index: usize) -> AudioSegment {
        let line = DialogueLine::new(index, Speaker::Host1, "Rachel", "你好");
        AudioSegment::pending(&line, PathBuf::from(format!("/tmp/segment_{}.mp3", index)))
    }

    #[test]
    fn test_transition_once() {
        let mut seg = segment(3);
        assert_eq!(seg.status(), SegmentStatus::Pending);
        assert_eq!(seg.index(), 3);

        seg.mark_synthesized().unwrap();
        assert!(seg.is_synthesized());

        let err = seg.mark_failed("late failure").unwrap_err();
        assert_eq!(
            err,
            SegmentError::AlreadyFinished {
                index: 3,
                status: SegmentStatus::Synthesized
            }
        );
        assert!(seg.error_message().is_none());
    }

    #[test]
    fn test_failed_keeps_reason() {
        let mut seg = segment(0);
        seg.mark_failed("network down").unwrap();
        assert_eq!(seg.status(), SegmentStatus::Failed);
        assert_eq!(seg.error_message(), Some("network down"));
        assert!(seg.mark_synthesized().is_err());
    }
}
