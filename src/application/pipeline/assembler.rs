//! Segment Assembler - 片段拼接
//!
//! 过滤合成成功的片段 → 按 index 排序写清单 → 调用合并工具（流拷贝）

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::ScratchFiles;
use crate::application::ports::{AudioMergerPort, MergeRequest};
use crate::domain::{AssemblyManifest, AudioSegment, PodcastArtifact, RunStats};

/// 最终产物文件名（不含扩展名）
pub const OUTPUT_FILE_STEM: &str = "full_podcast";
/// 清单文件名
pub const MANIFEST_FILE_NAME: &str = "concat.txt";

/// 组装错误
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("No audio segments were generated successfully")]
    Empty,

    #[error("Merge failed: {diagnostic}")]
    Merge { diagnostic: String },

    #[error("IO error: {0}")]
    Io(String),
}

/// 组装配置
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// 输出文件扩展名
    pub extension: String,
    /// 合并失败时保留临时文件用于排查
    pub keep_temp_on_failure: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            extension: "mp3".to_string(),
            keep_temp_on_failure: false,
        }
    }
}

/// 片段组装器
///
/// 同一个输出目录同一时间只能有一个 assemble 调用，由调用方保证
pub struct SegmentAssembler {
    merger: Arc<dyn AudioMergerPort>,
    config: AssemblerConfig,
}

impl SegmentAssembler {
    pub fn new(merger: Arc<dyn AudioMergerPort>, config: AssemblerConfig) -> Self {
        Self { merger, config }
    }

    /// 最终产物路径：`full_podcast.<ext>`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.{}", OUTPUT_FILE_STEM, self.config.extension))
    }

    pub fn manifest_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(MANIFEST_FILE_NAME)
    }

    /// 组装片段
    ///
    /// 接管所有片段文件，无论结果如何都会在返回前删除它们和清单文件
    /// （除非配置了 `keep_temp_on_failure` 且合并失败）
    pub async fn assemble(
        &self,
        segments: Vec<AudioSegment>,
        output_dir: &Path,
    ) -> Result<PodcastArtifact, AssemblyError> {
        let mut scratch = ScratchFiles::for_segments(&segments);

        let output_dir =
            std::path::absolute(output_dir).map_err(|e| AssemblyError::Io(e.to_string()))?;

        let manifest = AssemblyManifest::from_segments(&segments)
            .absolutize()
            .map_err(|e| AssemblyError::Io(e.to_string()))?;

        if manifest.is_empty() {
            tracing::warn!(
                total = segments.len(),
                "No audio segments were generated successfully"
            );
            return Err(AssemblyError::Empty);
        }

        let manifest_path = self.manifest_path(&output_dir);
        scratch.track(&manifest_path);
        tokio::fs::write(&manifest_path, manifest.to_concat_list())
            .await
            .map_err(|e| AssemblyError::Io(e.to_string()))?;

        tracing::debug!(
            manifest = %manifest_path.display(),
            order = ?manifest.indices(),
            "Assembly manifest written"
        );

        let output_path = self.output_path(&output_dir);
        let request = MergeRequest {
            manifest_path,
            output_path: output_path.clone(),
        };

        match self.merger.merge(&request).await {
            Ok(output) => {
                tracing::debug!(stdout = %output.stdout, "Merge tool output");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to merge audio segments");
                if self.config.keep_temp_on_failure {
                    let kept = scratch.keep();
                    tracing::info!(files = kept.len(), "Keeping temp files for postmortem");
                }
                return Err(AssemblyError::Merge {
                    diagnostic: e.diagnostic(),
                });
            }
        }

        let stats = RunStats {
            total_lines: segments.len(),
            synthesized_count: manifest.len(),
            failed_count: segments.len() - manifest.len(),
            ..RunStats::default()
        };

        tracing::info!(
            path = %output_path.display(),
            segments = manifest.len(),
            "Full podcast audio saved"
        );

        Ok(PodcastArtifact::new(output_path, &stats))
    }
}
