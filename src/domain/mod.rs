//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Script Context: 对话脚本解析
//! - Voice Context: 说话人音色映射
//! - Podcast Context: 片段、拼接清单与产物

pub mod podcast;
pub mod script;
pub mod voice;

pub use podcast::{AssemblyManifest, AudioSegment, PodcastArtifact, RunStats, SegmentStatus};
pub use script::{parse_script, DialogueLine, ParseWarning, ParsedScript, ParserConfig, Speaker};
pub use voice::{VoiceMapping, VoiceProfile};
