//! Merge Adapter - 音频拼接实现

mod fake_merger;
mod ffmpeg_merger;

pub use fake_merger::{parse_concat_list, FakeMerger};
pub use ffmpeg_merger::{FfmpegMerger, FfmpegMergerConfig};
