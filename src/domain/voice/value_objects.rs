//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

use super::VoiceError;

/// 默认女声
pub const DEFAULT_FEMALE_VOICE: &str = "zh-CN-XiaoxiaoNeural";
/// 默认男声
pub const DEFAULT_MALE_VOICE: &str = "zh-CN-YunxiNeural";

/// 合成引擎的音色标识
///
/// 不变量:
/// - 非空，不含空白字符
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceProfile(String);

impl VoiceProfile {
    pub fn new(id: impl Into<String>) -> Result<Self, VoiceError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(VoiceError::EmptyIdentifier);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(VoiceError::InvalidIdentifier(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn female() -> Self {
        Self(DEFAULT_FEMALE_VOICE.to_string())
    }

    pub fn male() -> Self {
        Self(DEFAULT_MALE_VOICE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
