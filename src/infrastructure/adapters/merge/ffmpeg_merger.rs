//! FFmpeg Merger - ffmpeg concat demuxer 流拷贝拼接
//!
//! `ffmpeg -y -f concat -safe 0 -i <manifest> -c copy <output>`

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{
    AudioMergerPort, CommandRunnerPort, CommandSpec, MergeFailure, MergeOutput, MergeRequest,
};

/// FFmpeg 配置
#[derive(Debug, Clone)]
pub struct FfmpegMergerConfig {
    /// ffmpeg 可执行文件路径
    pub ffmpeg_path: String,
}

impl Default for FfmpegMergerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

/// FFmpeg 拼接器
pub struct FfmpegMerger {
    runner: Arc<dyn CommandRunnerPort>,
    config: FfmpegMergerConfig,
}

impl FfmpegMerger {
    pub fn new(runner: Arc<dyn CommandRunnerPort>, config: FfmpegMergerConfig) -> Self {
        Self { runner, config }
    }

    fn concat_command(&self, request: &MergeRequest) -> CommandSpec {
        CommandSpec::new(&self.config.ffmpeg_path)
            .args(["-y", "-f", "concat", "-safe", "0", "-i"])
            .arg(request.manifest_path.to_string_lossy())
            .args(["-c", "copy"])
            .arg(request.output_path.to_string_lossy())
    }
}

#[async_trait]
impl AudioMergerPort for FfmpegMerger {
    async fn merge(&self, request: &MergeRequest) -> Result<MergeOutput, MergeFailure> {
        let spec = self.concat_command(request);
        tracing::info!(command = %spec.display(), "Running ffmpeg command");

        let output = self.runner.run(&spec).await?;
        if !output.success() {
            tracing::error!(
                exit_code = ?output.exit_code,
                stderr = %output.stderr,
                "FFmpeg error"
            );
            return Err(MergeFailure::ToolFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(MergeOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CommandOutput;
    use crate::infrastructure::adapters::ScriptedCommandRunner;
    use std::path::PathBuf;

    fn request() -> MergeRequest {
        MergeRequest {
            manifest_path: PathBuf::from("/out/concat.txt"),
            output_path: PathBuf::from("/out/full_podcast.mp3"),
        }
    }

    #[tokio::test]
    async fn test_stream_copy_command() {
        let runner = Arc::new(ScriptedCommandRunner::succeeding());
        let merger = FfmpegMerger::new(runner.clone(), FfmpegMergerConfig::default());

        merger.merge(&request()).await.unwrap();

        let specs = runner.invocations();
        assert_eq!(specs.len(), 1);
        assert_eq!(
            specs[0].display(),
            "ffmpeg -y -f concat -safe 0 -i /out/concat.txt -c copy /out/full_podcast.mp3"
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let runner = Arc::new(ScriptedCommandRunner::with_output(CommandOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "concat.txt: Invalid data found when processing input".to_string(),
        }));
        let merger = FfmpegMerger::new(runner, FfmpegMergerConfig::default());

        let err = merger.merge(&request()).await.unwrap_err();
        assert!(matches!(err, MergeFailure::ToolFailed { exit_code: Some(1), .. }));
        assert!(err.diagnostic().contains("Invalid data"));
    }

    #[tokio::test]
    async fn test_missing_ffmpeg() {
        let runner = Arc::new(ScriptedCommandRunner::missing_program());
        let merger = FfmpegMerger::new(
            runner,
            FfmpegMergerConfig {
                ffmpeg_path: "/opt/ffmpeg/bin/ffmpeg".to_string(),
            },
        );

        let err = merger.merge(&request()).await.unwrap_err();
        assert!(matches!(err, MergeFailure::Command(_)));
    }
}
