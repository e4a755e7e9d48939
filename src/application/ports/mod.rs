//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_merger;
mod command_runner;
mod source_loader;
mod text_generator;
mod tts_engine;

pub use audio_merger::{AudioMergerPort, MergeFailure, MergeOutput, MergeRequest};
pub use command_runner::{CommandError, CommandOutput, CommandRunnerPort, CommandSpec};
pub use source_loader::{SourceError, SourceKind, SourceLoaderPort};
pub use text_generator::{GenerationError, GenerationRequest, TextGeneratorPort};
pub use tts_engine::{SynthesisRequest, TtsEnginePort, TtsError};
