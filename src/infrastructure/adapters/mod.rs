//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod llm;
pub mod merge;
pub mod process;
pub mod source;
pub mod tts;

pub use llm::*;
pub use merge::*;
pub use process::*;
pub use source::*;
pub use tts::*;
