//! Script Context - Value Objects

use serde::{Deserialize, Serialize};

/// 说话人
///
/// 封闭集合：两位主持人 + 未识别的名字。
/// 未识别的说话人由 VoiceMapping 的 default 音色兜底。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// 女主持（Rachel）
    Host1,
    /// 男主持（Mike）
    Host2,
    /// 脚本里出现的其他名字
    Unrecognized,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Host1 => "host1",
            Speaker::Host2 => "host2",
            Speaker::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一行对话
///
/// 不变量:
/// - `index` 是该行在原始脚本中的行号（0 起），同一脚本内严格递增且唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub index: usize,
    pub speaker: Speaker,
    /// 脚本中写的说话人原文（用于日志）
    pub speaker_label: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(
        index: usize,
        speaker: Speaker,
        speaker_label: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            index,
            speaker,
            speaker_label: speaker_label.into(),
            text: text.into(),
        }
    }
}
