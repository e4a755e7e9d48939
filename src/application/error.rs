//! 应用层错误定义
//!
//! 流水线级别的致命错误。单行的解析警告、合成失败不会出现在这里，
//! 它们只计入 `RunStats`。

use thiserror::Error;

use crate::application::pipeline::PipelineStage;
use crate::application::script_generator::GenerationStage;
use crate::domain::RunStats;

/// 流水线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 缺少凭据/配置，在合成开始前暴露
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 没有任何可用片段，未调用合并工具
    #[error("No audio segments were generated successfully ({stats})")]
    EmptyAssembly { stats: RunStats },

    /// 合并工具失败
    #[error("Merge failed: {diagnostic}")]
    Merge { diagnostic: String, stats: RunStats },

    /// 运行被取消
    #[error("Pipeline cancelled ({stats})")]
    Cancelled { stats: RunStats },

    /// 文件系统错误
    #[error("IO error during {stage}: {message}")]
    Io {
        stage: PipelineStage,
        message: String,
    },

    /// 脚本生成失败
    #[error("Script generation failed at {stage} stage: {message}")]
    ScriptGeneration {
        stage: GenerationStage,
        message: String,
    },

    /// 输入源获取失败
    #[error("Input acquisition failed: {0}")]
    InputAcquisition(String),
}

impl PipelineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(stage: PipelineStage, err: impl std::fmt::Display) -> Self {
        Self::Io {
            stage,
            message: err.to_string(),
        }
    }

    /// 出错的阶段
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Io { stage, .. } => *stage,
            PipelineError::Cancelled { .. } => PipelineStage::Synthesizing,
            PipelineError::EmptyAssembly { .. } | PipelineError::Merge { .. } => {
                PipelineStage::Assembling
            }
            PipelineError::Configuration(_)
            | PipelineError::ScriptGeneration { .. }
            | PipelineError::InputAcquisition(_) => PipelineStage::Preparing,
        }
    }

    /// 失败时已汇总的统计
    pub fn stats(&self) -> Option<&RunStats> {
        match self {
            PipelineError::EmptyAssembly { stats }
            | PipelineError::Merge { stats, .. }
            | PipelineError::Cancelled { stats } => Some(stats),
            _ => None,
        }
    }
}

impl From<crate::application::ports::SourceError> for PipelineError {
    fn from(err: crate::application::ports::SourceError) -> Self {
        Self::InputAcquisition(err.to_string())
    }
}
