//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 说话人 → 合成音色的映射
//! - 音色标识校验

mod errors;
mod mapping;
mod value_objects;

pub use errors::VoiceError;
pub use mapping::VoiceMapping;
pub use value_objects::{VoiceProfile, DEFAULT_FEMALE_VOICE, DEFAULT_MALE_VOICE};
