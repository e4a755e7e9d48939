//! Source Adapter - 输入源获取实现
//!
//! - local_file: 本地 .txt
//! - web_page: 网页正文（去标签）
//! - youtube: 视频字幕
//! - composite: 按 SourceKind 分发

mod composite;
mod html;
mod local_file;
mod web_page;
mod youtube;

pub use composite::CompositeSourceLoader;
pub use html::html_to_text;
pub use local_file::LocalFileLoader;
pub use web_page::WebPageLoader;
pub use youtube::{extract_video_id, parse_timedtext, YoutubeTranscriptLoader};
