//! Voice Context - 说话人音色映射

use serde::{Deserialize, Serialize};

use super::VoiceProfile;
use crate::domain::script::Speaker;

/// 说话人 → 音色
///
/// 每次运行构造一次，之后只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMapping {
    host1: VoiceProfile,
    host2: VoiceProfile,
    default: VoiceProfile,
}

impl Default for VoiceMapping {
    /// Host1 → 女声，Host2 → 男声，其他 → 女声
    fn default() -> Self {
        Self::new(VoiceProfile::female(), VoiceProfile::male())
    }
}

impl VoiceMapping {
    /// 未识别的说话人使用女声（host1）
    pub fn new(female: VoiceProfile, male: VoiceProfile) -> Self {
        Self {
            default: female.clone(),
            host1: female,
            host2: male,
        }
    }

    pub fn with_default(mut self, default: VoiceProfile) -> Self {
        self.default = default;
        self
    }

    /// 解析说话人的音色，总是成功
    pub fn resolve(&self, speaker: Speaker) -> &VoiceProfile {
        match speaker {
            Speaker::Host1 => &self.host1,
            Speaker::Host2 => &self.host2,
            Speaker::Unrecognized => &self.default,
        }
    }

    pub fn default_voice(&self) -> &VoiceProfile {
        &self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_mapping() {
        let mapping = VoiceMapping::default();
        assert_eq!(mapping.resolve(Speaker::Host1).as_str(), "zh-CN-XiaoxiaoNeural");
        assert_eq!(mapping.resolve(Speaker::Host2).as_str(), "zh-CN-YunxiNeural");
        assert_eq!(mapping.resolve(Speaker::Unrecognized).as_str(), "zh-CN-XiaoxiaoNeural");
    }

    #[test]
    fn test_override_default() {
        let mapping = VoiceMapping::default().with_default(VoiceProfile::male());
        assert_eq!(mapping.resolve(Speaker::Unrecognized), &VoiceProfile::male());
        assert_eq!(mapping.resolve(Speaker::Host1), &VoiceProfile::female());
    }

    #[test]
    fn test_custom_voices() {
        let mapping = VoiceMapping::new(
            VoiceProfile::new("en-US-JennyNeural").unwrap(),
            VoiceProfile::new("en-US-GuyNeural").unwrap(),
        );
        assert_eq!(mapping.resolve(Speaker::Host2).as_str(), "en-US-GuyNeural");
        assert_eq!(mapping.default_voice().as_str(), "en-US-JennyNeural");
    }
}
