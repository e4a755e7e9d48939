//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、AudioMerger、CommandRunner、TextGenerator、SourceLoader）
//! - pipeline: 合成与组装流水线
//! - script_generator / input: 核心之外的协作方（脚本生成、输入获取）
//! - error: 应用层错误定义

pub mod error;
pub mod input;
pub mod pipeline;
pub mod ports;
pub mod prompts;
pub mod script_generator;

pub use error::PipelineError;
pub use input::InputAcquirer;
pub use pipeline::{
    AssemblerConfig, AssemblyError, PipelineOptions, PipelineOrchestrator, PipelineStage,
    RunRequest, ScratchFiles, SegmentAssembler, SegmentSynthesizer, SynthesisBatch,
    SynthesizerConfig,
};
pub use ports::{
    // Merge
    AudioMergerPort,
    MergeFailure,
    MergeOutput,
    MergeRequest,
    // Commands
    CommandError,
    CommandOutput,
    CommandRunnerPort,
    CommandSpec,
    // Sources
    SourceError,
    SourceKind,
    SourceLoaderPort,
    // Text generation
    GenerationError,
    GenerationRequest,
    TextGeneratorPort,
    // TTS engine
    SynthesisRequest,
    TtsEnginePort,
    TtsError,
};
pub use script_generator::{GenerationStage, ScriptGenerator, StageBudgets};
