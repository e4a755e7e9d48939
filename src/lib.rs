//! PodCastGen - 双人对话播客生成
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Script Context: 对话脚本解析（说话人识别、格式警告）
//! - Voice Context: 说话人 → 音色映射
//! - Podcast Context: 音频片段、拼接清单、最终产物
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, AudioMerger, CommandRunner, TextGenerator, SourceLoader）
//! - Pipeline: 解析 → 合成 → 组装 的编排
//! - ScriptGenerator / InputAcquirer: 素材获取与脚本生成
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: edge-tts / HTTP TTS、ffmpeg 拼接、子进程执行、LLM 客户端、输入源加载

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
