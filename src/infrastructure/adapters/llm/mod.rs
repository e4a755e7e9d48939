//! LLM Adapter - 文本生成实现

mod openai_compat_client;

pub use openai_compat_client::{OpenAiCompatClient, OpenAiCompatClientConfig};
