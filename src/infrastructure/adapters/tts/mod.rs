//! TTS Adapter - 语音合成引擎实现

mod edge_tts_client;
mod fake_tts_client;
mod http_tts_client;

pub use edge_tts_client::{filter_voices_by_language, EdgeTtsClient, EdgeTtsClientConfig, VoiceListing};
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
pub use http_tts_client::*;
