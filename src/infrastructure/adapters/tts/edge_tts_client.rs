//! Edge TTS Client - 调用 `edge-tts` 命令行
//!
//! 实现 TtsEnginePort trait:
//! `edge-tts --voice <voice> --text <text> --write-media <path>`
//!
//! 所有片段都是同一引擎输出的 mp3，满足流拷贝拼接的格式一致性要求

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{
    CommandError, CommandRunnerPort, CommandSpec, SynthesisRequest, TtsEnginePort, TtsError,
};

/// 语音列表中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceListing {
    pub name: String,
    pub gender: Option<String>,
}

/// Edge TTS 客户端配置
#[derive(Debug, Clone)]
pub struct EdgeTtsClientConfig {
    /// 可执行文件
    pub command: String,
}

impl Default for EdgeTtsClientConfig {
    fn default() -> Self {
        Self {
            command: "edge-tts".to_string(),
        }
    }
}

/// Edge TTS 客户端
pub struct EdgeTtsClient {
    runner: Arc<dyn CommandRunnerPort>,
    config: EdgeTtsClientConfig,
}

impl EdgeTtsClient {
    pub fn new(runner: Arc<dyn CommandRunnerPort>, config: EdgeTtsClientConfig) -> Self {
        Self { runner, config }
    }

    fn synth_command(&self, request: &SynthesisRequest) -> CommandSpec {
        CommandSpec::new(&self.config.command)
            .arg("--voice")
            .arg(&request.voice)
            .arg("--text")
            .arg(&request.text)
            .arg("--write-media")
            .arg(request.output_path.to_string_lossy())
    }

    /// 列出所有可用语音（原始输出）
    pub async fn list_voices(&self) -> Result<String, TtsError> {
        let spec = CommandSpec::new(&self.config.command).arg("--list-voices");
        let output = self.runner.run(&spec).await.map_err(command_error)?;
        if !output.success() {
            return Err(TtsError::ServiceError(format!(
                "Error listing voices: {}",
                output.stderr.trim()
            )));
        }
        Ok(output.stdout)
    }

    /// 列出指定语言（如 `zh-CN`）的语音
    pub async fn list_voices_by_language(
        &self,
        language_code: &str,
    ) -> Result<Vec<VoiceListing>, TtsError> {
        let listing = self.list_voices().await?;
        Ok(filter_voices_by_language(&listing, language_code))
    }
}

fn command_error(err: CommandError) -> TtsError {
    match err {
        CommandError::NotFound(program) => {
            TtsError::ServiceError(format!("{} is not installed", program))
        }
        other => TtsError::ServiceError(other.to_string()),
    }
}

/// 从 `--list-voices` 输出中筛选语言
///
/// 兼容两种输出：
/// - 块格式：`Name: zh-CN-XiaoxiaoNeural` / `Gender: Female`
/// - 表格格式：`zh-CN-XiaoxiaoNeural  Female  News, Novel  Warm`
pub fn filter_voices_by_language(listing: &str, language_code: &str) -> Vec<VoiceListing> {
    let mut voices: Vec<VoiceListing> = Vec::new();
    // 块格式中当前 Name 是否匹配
    let mut in_match = false;

    for line in listing.lines() {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("Name: ") {
            in_match = name.starts_with(language_code);
            if in_match {
                voices.push(VoiceListing {
                    name: name.trim().to_string(),
                    gender: None,
                });
            }
        } else if let Some(gender) = line.strip_prefix("Gender: ") {
            if in_match {
                if let Some(last) = voices.last_mut() {
                    last.gender = Some(gender.trim().to_string());
                }
            }
        } else {
            let mut columns = line.split_whitespace();
            if let Some(name) = columns.next() {
                if name.starts_with(language_code) {
                    voices.push(VoiceListing {
                        name: name.to_string(),
                        gender: columns.next().map(str::to_string),
                    });
                }
            }
        }
    }

    voices
}

#[async_trait]
impl TtsEnginePort for EdgeTtsClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), TtsError> {
        let spec = self.synth_command(request);

        tracing::debug!(
            voice = %request.voice,
            text_len = request.text.len(),
            output = %request.output_path.display(),
            "Running edge-tts"
        );

        let output = self.runner.run(&spec).await.map_err(command_error)?;
        if !output.success() {
            return Err(TtsError::ServiceError(format!(
                "edge-tts exited with {:?}: {}",
                output.exit_code,
                output.stderr.trim()
            )));
        }

        Ok(())
    }

    /// 只要程序能启动即视为可用，退出码不参与判断
    async fn health_check(&self) -> bool {
        let spec = CommandSpec::new(&self.config.command).arg("--help");
        match self.runner.run(&spec).await {
            Ok(output) => {
                if !output.success() {
                    tracing::debug!(
                        exit_code = ?output.exit_code,
                        "edge-tts --help exited non-zero"
                    );
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "edge-tts is not available");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CommandOutput;
    use crate::infrastructure::adapters::ScriptedCommandRunner;
    use std::path::PathBuf;

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            text: "你好：世界".to_string(),
            voice: "zh-CN-YunxiNeural".to_string(),
            output_path: PathBuf::from("/out/segment_1.mp3"),
        }
    }

    #[tokio::test]
    async fn test_synthesize_builds_command() {
        let runner = Arc::new(ScriptedCommandRunner::succeeding());
        let client = EdgeTtsClient::new(runner.clone(), EdgeTtsClientConfig::default());

        client.synthesize(&request()).await.unwrap();

        let specs = runner.invocations();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].program, "edge-tts");
        assert_eq!(
            specs[0].args,
            vec![
                "--voice",
                "zh-CN-YunxiNeural",
                "--text",
                "你好：世界",
                "--write-media",
                "/out/segment_1.mp3"
            ]
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let runner = Arc::new(ScriptedCommandRunner::with_output(CommandOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "403 Forbidden".to_string(),
        }));
        let client = EdgeTtsClient::new(runner, EdgeTtsClientConfig::default());

        let err = client.synthesize(&request()).await.unwrap_err();
        assert!(err.to_string().contains("403 Forbidden"));
    }

    #[tokio::test]
    async fn test_health_check_invokes_help() {
        let runner = Arc::new(ScriptedCommandRunner::succeeding());
        let client = EdgeTtsClient::new(runner.clone(), EdgeTtsClientConfig::default());

        assert!(client.health_check().await);

        let specs = runner.invocations();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].program, "edge-tts");
        assert_eq!(specs[0].args, vec!["--help".to_string()]);
    }

    #[tokio::test]
    async fn test_nonzero_exit_still_counts_as_installed() {
        let runner = Arc::new(ScriptedCommandRunner::with_output(CommandOutput {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "error: unrecognized arguments".to_string(),
        }));
        let client = EdgeTtsClient::new(runner, EdgeTtsClientConfig::default());
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_missing_binary_fails_health_check() {
        let runner = Arc::new(ScriptedCommandRunner::missing_program());
        let client = EdgeTtsClient::new(runner, EdgeTtsClientConfig::default());
        assert!(!client.health_check().await);
    }

    #[test]
    fn test_filter_block_format() {
        let listing = "Name: en-US-AriaNeural\nGender: Female\n\nName: zh-CN-XiaoxiaoNeural\nGender: Female\n\nName: zh-CN-YunxiNeural\nGender: Male\n";
        let voices = filter_voices_by_language(listing, "zh-CN");
        assert_eq!(
            voices,
            vec![
                VoiceListing {
                    name: "zh-CN-XiaoxiaoNeural".to_string(),
                    gender: Some("Female".to_string())
                },
                VoiceListing {
                    name: "zh-CN-YunxiNeural".to_string(),
                    gender: Some("Male".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_filter_table_format() {
        let listing = "Name                   Gender    ContentCategories      VoicePersonalities\n\
                       ---------------------  --------  ---------------------  --------------------\n\
                       en-US-GuyNeural        Male      News, Novel            Passion\n\
                       zh-CN-YunxiNeural      Male      Novel                  Lively, Sunshine\n";
        let voices = filter_voices_by_language(listing, "zh-CN");
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].name, "zh-CN-YunxiNeural");
        assert_eq!(voices[0].gender.as_deref(), Some("Male"));
    }
}
