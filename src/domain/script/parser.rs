//! 脚本解析器
//!
//! 把 `说话人：台词` 形式的原始脚本切成有序的对话行

use super::{DialogueLine, Speaker};

/// 全角冒号（优先）
pub const FULLWIDTH_COLON: char = '：';
/// ASCII 冒号
pub const ASCII_COLON: char = ':';

/// 解析配置
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// 男主持在脚本中的名字（大小写不敏感）
    pub male_speaker: String,
    /// 女主持在脚本中的名字（大小写不敏感）
    pub female_speaker: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            male_speaker: "mike".to_string(),
            female_speaker: "rachel".to_string(),
        }
    }
}

impl ParserConfig {
    fn classify(&self, label: &str) -> Speaker {
        let label = label.trim().to_lowercase();
        if label == self.male_speaker.trim().to_lowercase() {
            Speaker::Host2
        } else if label == self.female_speaker.trim().to_lowercase() {
            Speaker::Host1
        } else {
            Speaker::Unrecognized
        }
    }
}

/// 被跳过的非空行（缺少分隔符）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 原始行号
    pub line_index: usize,
    pub content: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: missing speaker separator: {}",
            self.line_index, self.content
        )
    }
}

/// 解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedScript {
    pub lines: Vec<DialogueLine>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedScript {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// 在第一个分隔符处切开
///
/// 与原始脚本格式保持一致：只要行内出现全角冒号就以它为准，
/// 否则才使用 ASCII 冒号
fn split_speaker(line: &str) -> Option<(&str, &str)> {
    line.split_once(FULLWIDTH_COLON)
        .or_else(|| line.split_once(ASCII_COLON))
}

/// 解析原始脚本
///
/// 规则：
/// 1. 按行分割，行号即 `DialogueLine::index`
/// 2. 空行/纯空白行直接跳过，不产生警告
/// 3. 没有分隔符的行跳过并记录 `ParseWarning`
pub fn parse_script(raw: &str, config: &ParserConfig) -> ParsedScript {
    let mut parsed = ParsedScript::default();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match split_speaker(line) {
            Some((label, text)) => {
                let label = label.trim();
                parsed.lines.push(DialogueLine::new(
                    index,
                    config.classify(label),
                    label,
                    text.trim(),
                ));
            }
            None => {
                tracing::warn!(line_index = index, content = %line, "Skipping invalid line format");
                parsed.warnings.push(ParseWarning {
                    line_index: index,
                    content: line.to_string(),
                });
            }
        }
    }

    parsed
}
