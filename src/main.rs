//! PodCastGen - 双人对话播客生成
//!
//! 命令行入口：读取配置 → 获取素材/脚本 → 合成并拼接

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use podcastgen::application::ports::{CommandRunnerPort, SourceLoaderPort, TtsEnginePort};
use podcastgen::application::{
    AssemblerConfig, InputAcquirer, PipelineError, PipelineOrchestrator, RunRequest,
    ScriptGenerator, SegmentAssembler, SegmentSynthesizer, SynthesizerConfig,
};
use podcastgen::config::{
    load_config_from_path, print_config, validate_config, AppConfig, TtsEngineKind,
};
use podcastgen::infrastructure::{
    CompositeSourceLoader, EdgeTtsClient, EdgeTtsClientConfig, FfmpegMerger, FfmpegMergerConfig,
    HttpTtsClient, HttpTtsClientConfig, LocalFileLoader, OpenAiCompatClient,
    OpenAiCompatClientConfig, TokioCommandRunner, WebPageLoader, YoutubeTranscriptLoader,
};

#[derive(Parser, Debug)]
#[command(name = "podcastgen", version, about = "PodCastGen - AI Podcast Generator")]
struct Cli {
    /// 配置文件路径（默认搜索 podcastgen.toml）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 列出所有可用语音
    #[arg(long, conflicts_with = "list_language")]
    list_voices: bool,

    /// 列出指定语言的语音（如 zh-CN, en-US）
    #[arg(long, value_name = "CODE")]
    list_language: Option<String>,

    /// 输入源：本地 .txt、网页 URL 或 YouTube URL
    input_source: Option<String>,

    /// 输出目录
    output_dir: Option<PathBuf>,

    /// 输入文件已经是对话脚本，跳过脚本生成
    #[arg(long)]
    use_script: bool,

    #[arg(long)]
    male_voice: Option<String>,

    #[arg(long)]
    female_voice: Option<String>,

    /// 同时合成的片段数
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值），命令行参数再覆盖
    let mut config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    apply_overrides(&mut config, &cli);
    validate_config(&config).map_err(|e| anyhow::anyhow!("{}", e))?;

    init_tracing(&config);
    print_config(&config);

    let runner: Arc<dyn CommandRunnerPort> = Arc::new(TokioCommandRunner::new());

    if cli.list_voices || cli.list_language.is_some() {
        return list_voices(runner, &config, cli.list_language.as_deref()).await;
    }

    let (Some(input_source), Some(output_dir)) = (cli.input_source.clone(), cli.output_dir.clone())
    else {
        anyhow::bail!("input_source and output_dir are required unless listing voices");
    };

    let script = if cli.use_script {
        load_script(&config, &input_source).await?
    } else {
        generate_script(&config, &input_source).await?
    };

    println!("\nGenerated Script:\n{}\n", script);

    let orchestrator = build_orchestrator(&config, runner)?;

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received interrupt, cancelling");
            ctrl_c_token.cancel();
        }
    });

    let request = RunRequest { script, output_dir };
    match orchestrator.run(&request, &cancel).await {
        Ok(artifact) => {
            println!("Podcast generated: {}", artifact.path.display());
            println!(
                "Lines processed: {}, synthesized: {}, skipped: {}, failed: {}",
                artifact.total_lines,
                artifact.synthesized_count,
                artifact.skipped_count,
                artifact.failed_count
            );
            Ok(())
        }
        Err(e) => {
            if let Some(stats) = e.stats() {
                eprintln!("Run summary: {}", stats);
            }
            Err(e.into())
        }
    }
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(voice) = &cli.male_voice {
        config.voices.male = voice.clone();
    }
    if let Some(voice) = &cli.female_voice {
        config.voices.female = voice.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.pipeline.max_concurrent = concurrency;
    }
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},podcastgen={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn list_voices(
    runner: Arc<dyn CommandRunnerPort>,
    config: &AppConfig,
    language: Option<&str>,
) -> anyhow::Result<()> {
    let client = EdgeTtsClient::new(
        runner,
        EdgeTtsClientConfig {
            command: config.tts.command.clone(),
        },
    );

    match language {
        Some(code) => {
            let voices = client.list_voices_by_language(code).await?;
            if voices.is_empty() {
                println!("No voices found for {}", code);
            }
            for voice in voices {
                println!("Name: {}", voice.name);
                if let Some(gender) = voice.gender {
                    println!("Gender: {}", gender);
                }
            }
        }
        None => print!("{}", client.list_voices().await?),
    }
    Ok(())
}

/// 本地文件、网页和视频字幕共用的加载器
fn source_loader(config: &AppConfig) -> Result<CompositeSourceLoader, PipelineError> {
    Ok(CompositeSourceLoader::new(
        Arc::new(LocalFileLoader),
        Arc::new(WebPageLoader::new(config.llm.timeout_secs)?),
        Arc::new(YoutubeTranscriptLoader::new(config.llm.timeout_secs)?),
    ))
}

/// --use-script: 输入源本身就是对话脚本
async fn load_script(config: &AppConfig, input_source: &str) -> Result<String, PipelineError> {
    Ok(source_loader(config)?.load(input_source).await?)
}

async fn generate_script(config: &AppConfig, input_source: &str) -> anyhow::Result<String> {
    let llm = OpenAiCompatClient::new(OpenAiCompatClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        timeout_secs: config.llm.timeout_secs,
    })
    .map_err(|e| PipelineError::configuration(e.to_string()))?;
    let generator = Arc::new(ScriptGenerator::new(
        Arc::new(llm),
        config.llm.stage_budgets(),
    ));

    let acquirer = InputAcquirer::new(Arc::new(source_loader(config)?), Some(generator.clone()));

    let text = acquirer.acquire(input_source).await?;
    tracing::info!(text_len = text.len(), "Input acquired, generating script");

    Ok(generator.generate(&text).await?)
}

fn build_orchestrator(
    config: &AppConfig,
    runner: Arc<dyn CommandRunnerPort>,
) -> anyhow::Result<PipelineOrchestrator> {
    let tts_engine: Arc<dyn TtsEnginePort> = match config.tts.engine {
        TtsEngineKind::Edge => Arc::new(EdgeTtsClient::new(
            runner.clone(),
            EdgeTtsClientConfig {
                command: config.tts.command.clone(),
            },
        )),
        TtsEngineKind::Http => Arc::new(HttpTtsClient::new(HttpTtsClientConfig {
            base_url: config.tts.url.clone(),
            timeout_secs: config.tts.timeout_secs,
            max_retries: config.tts.max_retries,
        })?),
    };

    let merger = Arc::new(FfmpegMerger::new(
        runner,
        FfmpegMergerConfig {
            ffmpeg_path: config.merge.ffmpeg_path.clone(),
        },
    ));

    let voices = config
        .voices
        .voice_mapping()
        .context("Invalid voice configuration")?;

    let synthesizer = SegmentSynthesizer::new(
        tts_engine,
        SynthesizerConfig {
            extension: config.tts.extension.clone(),
            max_concurrent: config.pipeline.max_concurrent,
        },
    );
    let assembler = SegmentAssembler::new(
        merger,
        AssemblerConfig {
            extension: config.tts.extension.clone(),
            keep_temp_on_failure: config.pipeline.keep_temp_on_failure,
        },
    );

    Ok(PipelineOrchestrator::new(
        config.voices.parser_config(),
        voices,
        synthesizer,
        assembler,
        config.pipeline.options(),
    ))
}
