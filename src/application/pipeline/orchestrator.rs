//! Pipeline Orchestrator - 流水线编排
//!
//! 状态机: Parsing → Synthesizing → Assembling → Done / Failed
//!
//! 单行合成失败不会中断流水线，只有「零可用片段」和「合并工具失败」是致命的。
//! 每次运行都重新生成临时文件并覆盖最终产物，没有跨运行的缓存。

use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::{AssemblyError, ScratchFiles, SegmentAssembler, SegmentSynthesizer};
use crate::application::error::PipelineError;
use crate::domain::{parse_script, ParserConfig, PodcastArtifact, RunStats, VoiceMapping};

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// 输入获取 / 脚本生成（核心之外）
    Preparing,
    Parsing,
    Synthesizing,
    Assembling,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Preparing => "preparing",
            PipelineStage::Parsing => "parsing",
            PipelineStage::Synthesizing => "synthesizing",
            PipelineStage::Assembling => "assembling",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 流水线选项
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// 取消后是否把已完成的片段拼成部分产物（否则全部清理）
    pub assemble_partial_on_cancel: bool,
}

/// 一次运行的输入
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub script: String,
    pub output_dir: PathBuf,
}

/// 流水线编排器
pub struct PipelineOrchestrator {
    parser_config: ParserConfig,
    voices: VoiceMapping,
    synthesizer: SegmentSynthesizer,
    assembler: SegmentAssembler,
    options: PipelineOptions,
}

impl PipelineOrchestrator {
    pub fn new(
        parser_config: ParserConfig,
        voices: VoiceMapping,
        synthesizer: SegmentSynthesizer,
        assembler: SegmentAssembler,
        options: PipelineOptions,
    ) -> Self {
        Self {
            parser_config,
            voices,
            synthesizer,
            assembler,
            options,
        }
    }

    /// 执行流水线
    pub async fn run(
        &self,
        request: &RunRequest,
        cancel: &CancellationToken,
    ) -> Result<PodcastArtifact, PipelineError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline", run_id = %run_id);

        async move {
            let mut stats = RunStats::default();
            let result = self.run_stages(request, cancel, &mut stats).await;

            match &result {
                Ok(artifact) => {
                    tracing::info!(
                        stage = %PipelineStage::Done,
                        path = %artifact.path.display(),
                        %stats,
                        "Pipeline finished"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        stage = %PipelineStage::Failed,
                        failed_stage = %e.stage(),
                        error = %e,
                        %stats,
                        "Pipeline failed"
                    );
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(
        &self,
        request: &RunRequest,
        cancel: &CancellationToken,
        stats: &mut RunStats,
    ) -> Result<PodcastArtifact, PipelineError> {
        // Parsing
        tracing::info!(stage = %PipelineStage::Parsing, "Pipeline stage");
        let parsed = parse_script(&request.script, &self.parser_config);
        stats.total_lines = parsed.lines.len();
        stats.skipped_count = parsed.warnings.len();

        if !self.synthesizer.check_ready().await {
            return Err(PipelineError::configuration(
                "speech synthesis engine is not available",
            ));
        }

        tokio::fs::create_dir_all(&request.output_dir)
            .await
            .map_err(|e| PipelineError::io(PipelineStage::Preparing, e))?;
        let output_dir = tokio::fs::canonicalize(&request.output_dir)
            .await
            .map_err(|e| PipelineError::io(PipelineStage::Preparing, e))?;

        // Synthesizing
        tracing::info!(
            stage = %PipelineStage::Synthesizing,
            lines = parsed.lines.len(),
            output_dir = %output_dir.display(),
            "Pipeline stage"
        );
        let batch = self
            .synthesizer
            .synthesize_all(&parsed.lines, &self.voices, &output_dir, cancel)
            .await;
        stats.synthesized_count = batch.synthesized_count();
        stats.failed_count = batch.failed_count();
        stats.not_attempted = batch.not_attempted;

        if batch.cancelled && !self.options.assemble_partial_on_cancel {
            drop(ScratchFiles::for_segments(&batch.segments));
            return Err(PipelineError::Cancelled { stats: *stats });
        }

        // Assembling
        tracing::info!(stage = %PipelineStage::Assembling, "Pipeline stage");
        match self.assembler.assemble(batch.segments, &output_dir).await {
            Ok(mut artifact) => {
                artifact.total_lines = stats.total_lines;
                artifact.skipped_count = stats.skipped_count;
                Ok(artifact)
            }
            Err(AssemblyError::Empty) => Err(PipelineError::EmptyAssembly { stats: *stats }),
            Err(AssemblyError::Merge { diagnostic }) => Err(PipelineError::Merge {
                diagnostic,
                stats: *stats,
            }),
            Err(AssemblyError::Io(message)) => Err(PipelineError::Io {
                stage: PipelineStage::Assembling,
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::{AssemblerConfig, SynthesizerConfig};
    use crate::infrastructure::adapters::{FakeMerger, FakeTtsClient, FakeTtsClientConfig};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn orchestrator(
        tts: Arc<FakeTtsClient>,
        merger: Arc<FakeMerger>,
        options: PipelineOptions,
    ) -> PipelineOrchestrator {
        PipelineOrchestrator::new(
            ParserConfig::default(),
            VoiceMapping::default(),
            SegmentSynthesizer::new(tts, SynthesizerConfig::default()),
            SegmentAssembler::new(merger, AssemblerConfig::default()),
            options,
        )
    }

    #[tokio::test]
    async fn test_stats_count_skipped_lines() {
        let dir = tempdir().unwrap();
        let merger = Arc::new(FakeMerger::new());
        let orch = orchestrator(
            Arc::new(FakeTtsClient::with_defaults()),
            merger.clone(),
            PipelineOptions::default(),
        );

        let request = RunRequest {
            script: "Rachel：一\n没有分隔符\nMike：二".to_string(),
            output_dir: dir.path().to_path_buf(),
        };
        let artifact = orch.run(&request, &CancellationToken::new()).await.unwrap();

        assert_eq!(artifact.total_lines, 2);
        assert_eq!(artifact.synthesized_count, 2);
        assert_eq!(artifact.skipped_count, 1);
        assert_eq!(merger.merged_indices(), vec![vec![0, 2]]);
    }

    #[tokio::test]
    async fn test_unavailable_engine_is_configuration_error() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig::default().unhealthy()));
        let orch = orchestrator(tts.clone(), Arc::new(FakeMerger::new()), PipelineOptions::default());

        let request = RunRequest {
            script: "Rachel：你好".to_string(),
            output_dir: dir.path().to_path_buf(),
        };
        let err = orch.run(&request, &CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Configuration(_)));
        assert!(tts.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_run_cleans_partial_segments() {
        let dir = tempdir().unwrap();
        let merger = Arc::new(FakeMerger::new());
        let orch = orchestrator(
            Arc::new(FakeTtsClient::with_defaults()),
            merger.clone(),
            PipelineOptions::default(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let request = RunRequest {
            script: "Rachel：你好\nMike：大家好".to_string(),
            output_dir: dir.path().to_path_buf(),
        };
        let err = orch.run(&request, &cancel).await.unwrap_err();

        match err {
            PipelineError::Cancelled { stats } => assert_eq!(stats.not_attempted, 2),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(merger.call_count(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_mid_run_assembles_partial_when_enabled() {
        let dir = tempdir().unwrap();
        let cancel = CancellationToken::new();
        let tts = Arc::new(FakeTtsClient::new(
            FakeTtsClientConfig::default().cancel_after_text("大家好", cancel.clone()),
        ));
        let merger = Arc::new(FakeMerger::new());
        let orch = orchestrator(
            tts,
            merger.clone(),
            PipelineOptions {
                assemble_partial_on_cancel: true,
            },
        );

        let request = RunRequest {
            script: "Rachel：你好\nMike：大家好\nRachel：再见".to_string(),
            output_dir: dir.path().to_path_buf(),
        };
        let artifact = orch.run(&request, &cancel).await.unwrap();

        assert_eq!(artifact.synthesized_count, 2);
        assert_eq!(artifact.total_lines, 3);
        assert_eq!(merger.merged_indices(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_error_stage() {
        let err = PipelineError::EmptyAssembly {
            stats: RunStats::default(),
        };
        assert_eq!(err.stage(), PipelineStage::Assembling);
        assert_eq!(
            PipelineError::configuration("missing key").stage(),
            PipelineStage::Preparing
        );
    }
}
