//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("音色标识不能为空")]
    EmptyIdentifier,

    #[error("无效的音色标识: {0}")]
    InvalidIdentifier(String),
}
