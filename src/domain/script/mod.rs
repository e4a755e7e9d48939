//! Script Context - 对话脚本限界上下文
//!
//! 职责:
//! - 说话人识别
//! - 原始脚本 → 有序对话行

mod parser;
mod value_objects;

pub use parser::{parse_script, ParseWarning, ParsedScript, ParserConfig, ASCII_COLON, FULLWIDTH_COLON};
pub use value_objects::{DialogueLine, Speaker};
