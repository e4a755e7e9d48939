//! Podcast Context - 播客组装限界上下文
//!
//! 职责:
//! - 单行音频片段的状态
//! - 拼接清单（按 index 排序）
//! - 最终产物与运行统计

mod artifact;
mod manifest;
mod segment;

pub use artifact::{PodcastArtifact, RunStats};
pub use manifest::AssemblyManifest;
pub use segment::{AudioSegment, SegmentError, SegmentStatus};
