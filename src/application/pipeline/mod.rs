//! 音频合成与组装流水线
//!
//! 解析 → 逐行合成 → 按 index 排序拼接

mod assembler;
mod orchestrator;
mod scratch;
mod synthesizer;

pub use assembler::{
    AssemblerConfig, AssemblyError, SegmentAssembler, MANIFEST_FILE_NAME, OUTPUT_FILE_STEM,
};
pub use orchestrator::{PipelineOptions, PipelineOrchestrator, PipelineStage, RunRequest};
pub use scratch::ScratchFiles;
pub use synthesizer::{SegmentSynthesizer, SynthesisBatch, SynthesizerConfig};
