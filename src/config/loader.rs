//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（podcastgen.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsEngineKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["podcastgen", "podcastgen.local"];

/// LLM API key 的后备环境变量
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PODCASTGEN_`，层级分隔符 `__`）
/// 2. 配置文件（podcastgen.toml 或 podcastgen.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `PODCASTGEN_TTS__ENGINE=http`
/// - `PODCASTGEN_VOICES__MALE=zh-CN-YunjianNeural`
/// - `PODCASTGEN_PIPELINE__MAX_CONCURRENT=4`
/// - `PODCASTGEN_MERGE__FFMPEG_PATH=/usr/local/bin/ffmpeg`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("tts.engine", "edge")?
        .set_default("tts.command", "edge-tts")?
        .set_default("tts.url", "http://localhost:8000")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("tts.max_retries", 0)?
        .set_default("tts.extension", "mp3")?
        .set_default("merge.ffmpeg_path", "ffmpeg")?
        .set_default("pipeline.max_concurrent", 1)?
        .set_default("pipeline.keep_temp_on_failure", false)?
        .set_default("pipeline.assemble_partial_on_cancel", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: PODCASTGEN_LLM__MODEL=llama-3.3-70b-versatile
    builder = builder.add_source(
        Environment::with_prefix("PODCASTGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    if app_config.llm.api_key.is_none() {
        app_config.llm.api_key = std::env::var(API_KEY_ENV).ok();
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.pipeline.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.max_concurrent cannot be 0".to_string(),
        ));
    }

    if config.voices.male.trim().is_empty() || config.voices.female.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "voices.male and voices.female cannot be empty".to_string(),
        ));
    }

    if config.tts.extension.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tts.extension cannot be empty".to_string(),
        ));
    }

    if config.merge.ffmpeg_path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "merge.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("TTS Engine: {:?}", config.tts.engine);
    match config.tts.engine {
        TtsEngineKind::Edge => tracing::info!("TTS Command: {}", config.tts.command),
        TtsEngineKind::Http => {
            tracing::info!("TTS URL: {}", config.tts.url);
            tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
        }
    }
    tracing::info!("Segment Extension: {}", config.tts.extension);
    tracing::info!(
        "Voices: {} -> {}, {} -> {}",
        config.voices.female_speaker,
        config.voices.female,
        config.voices.male_speaker,
        config.voices.male
    );
    tracing::info!("FFmpeg: {}", config.merge.ffmpeg_path);
    tracing::info!("LLM: {} ({})", config.llm.model, config.llm.base_url);
    tracing::info!("LLM API Key: {}", if config.llm.api_key.is_some() { "set" } else { "missing" });
    tracing::info!("Max Concurrent: {}", config.pipeline.max_concurrent);
    tracing::info!("Keep Temp On Failure: {}", config.pipeline.keep_temp_on_failure);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
