//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现：TTS 引擎、ffmpeg 拼接、子进程、LLM、输入源

pub mod adapters;

pub use adapters::{
    CompositeSourceLoader, EdgeTtsClient, EdgeTtsClientConfig, FfmpegMerger, FfmpegMergerConfig,
    HttpTtsClient, HttpTtsClientConfig, LocalFileLoader, OpenAiCompatClient,
    OpenAiCompatClientConfig, TokioCommandRunner, WebPageLoader, YoutubeTranscriptLoader,
};
