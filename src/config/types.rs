//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::{PipelineOptions, StageBudgets};
use crate::domain::voice::VoiceError;
use crate::domain::{ParserConfig, VoiceMapping, VoiceProfile};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 拼接配置
    #[serde(default)]
    pub merge: MergeConfig,

    /// 脚本生成（LLM）配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 流水线配置
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// TTS 引擎类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngineKind {
    /// edge-tts 命令行
    #[default]
    Edge,
    /// 外部 HTTP 推理服务
    Http,
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub engine: TtsEngineKind,

    /// edge-tts 可执行文件
    #[serde(default = "default_tts_command")]
    pub command: String,

    /// HTTP 引擎的服务地址
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数（仅 HTTP 引擎）
    #[serde(default)]
    pub max_retries: u32,

    /// 片段与成品的扩展名
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_tts_command() -> String {
    "edge-tts".to_string()
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_extension() -> String {
    "mp3".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngineKind::default(),
            command: default_tts_command(),
            url: default_tts_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            extension: default_extension(),
        }
    }
}

/// 音色配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 男声
    #[serde(default = "default_male_voice")]
    pub male: String,

    /// 女声（同时是未识别说话人的默认音色）
    #[serde(default = "default_female_voice")]
    pub female: String,

    /// 脚本中的男主持名字
    #[serde(default = "default_male_speaker")]
    pub male_speaker: String,

    /// 脚本中的女主持名字
    #[serde(default = "default_female_speaker")]
    pub female_speaker: String,
}

fn default_male_voice() -> String {
    crate::domain::voice::DEFAULT_MALE_VOICE.to_string()
}

fn default_female_voice() -> String {
    crate::domain::voice::DEFAULT_FEMALE_VOICE.to_string()
}

fn default_male_speaker() -> String {
    "mike".to_string()
}

fn default_female_speaker() -> String {
    "rachel".to_string()
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            male: default_male_voice(),
            female: default_female_voice(),
            male_speaker: default_male_speaker(),
            female_speaker: default_female_speaker(),
        }
    }
}

impl VoicesConfig {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            male_speaker: self.male_speaker.clone(),
            female_speaker: self.female_speaker.clone(),
        }
    }

    pub fn voice_mapping(&self) -> Result<VoiceMapping, VoiceError> {
        Ok(VoiceMapping::new(
            VoiceProfile::new(&self.female)?,
            VoiceProfile::new(&self.male)?,
        ))
    }
}

/// 拼接配置
#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    /// ffmpeg 可执行文件路径
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

/// 各生成阶段的 token 上限
#[derive(Debug, Clone, Deserialize)]
pub struct MaxTokensConfig {
    #[serde(default = "default_max_tokens")]
    pub outline: u32,
    #[serde(default = "default_max_tokens")]
    pub full_script: u32,
    #[serde(default = "default_max_tokens")]
    pub dialogue: u32,
}

fn default_max_tokens() -> u32 {
    8000
}

impl Default for MaxTokensConfig {
    fn default() -> Self {
        Self {
            outline: default_max_tokens(),
            full_script: default_max_tokens(),
            dialogue: default_max_tokens(),
        }
    }
}

/// 脚本生成（LLM）配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// OpenAI 兼容接口地址
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API key，未设置时读取 GROQ_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default)]
    pub max_tokens: MaxTokensConfig,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: None,
            model: default_llm_model(),
            max_tokens: MaxTokensConfig::default(),
            timeout_secs: default_timeout(),
        }
    }
}

impl LlmConfig {
    pub fn stage_budgets(&self) -> StageBudgets {
        StageBudgets {
            outline: self.max_tokens.outline,
            full_script: self.max_tokens.full_script,
            dialogue: self.max_tokens.dialogue,
        }
    }
}

/// 流水线配置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// 同时进行的合成数，1 表示逐行顺序合成
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 拼接失败时保留片段文件
    #[serde(default)]
    pub keep_temp_on_failure: bool,

    /// 取消后用已完成的片段拼接部分成品
    #[serde(default)]
    pub assemble_partial_on_cancel: bool,
}

fn default_max_concurrent() -> usize {
    1
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            keep_temp_on_failure: false,
            assemble_partial_on_cancel: false,
        }
    }
}

impl PipelineConfig {
    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            assemble_partial_on_cancel: self.assemble_partial_on_cancel,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
