//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 写入固定的音频字节，不实际调用 TTS 服务。
//! 可以按文本注入失败、空文件和延迟。

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 写入每个片段的音频数据
    pub audio_data: Vec<u8>,
    /// 模拟推理延迟
    pub latency: Duration,
    /// 这些文本合成失败
    pub fail_texts: HashSet<String>,
    /// 这些文本写出空文件
    pub empty_texts: HashSet<String>,
    /// 这些文本报告成功但不写文件
    pub silent_texts: HashSet<String>,
    /// 按文本覆盖延迟
    pub text_latency: HashMap<String, Duration>,
    /// 合成完这段文本后触发取消
    pub cancel_after: Option<(String, CancellationToken)>,
    pub healthy: bool,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"ID3fake-mp3-frame".to_vec(),
            latency: Duration::ZERO,
            fail_texts: HashSet::new(),
            empty_texts: HashSet::new(),
            silent_texts: HashSet::new(),
            text_latency: HashMap::new(),
            cancel_after: None,
            healthy: true,
        }
    }
}

impl FakeTtsClientConfig {
    pub fn fail_on(mut self, text: impl Into<String>) -> Self {
        self.fail_texts.insert(text.into());
        self
    }

    pub fn empty_on(mut self, text: impl Into<String>) -> Self {
        self.empty_texts.insert(text.into());
        self
    }

    pub fn silent_on(mut self, text: impl Into<String>) -> Self {
        self.silent_texts.insert(text.into());
        self
    }

    pub fn delay_on(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.text_latency.insert(text.into(), delay);
        self
    }

    pub fn cancel_after_text(mut self, text: impl Into<String>, token: CancellationToken) -> Self {
        self.cancel_after = Some((text.into(), token));
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }
}

/// Fake TTS Client
///
/// 按完成顺序记录每次调用
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: Mutex<Vec<SynthesisRequest>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 已完成的调用（按完成顺序）
    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, request: &SynthesisRequest) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeTtsClient: writing fixed audio"
        );

        let delay = self
            .config
            .text_latency
            .get(&request.text)
            .copied()
            .unwrap_or(self.config.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.record(request);

        if self.config.fail_texts.contains(&request.text) {
            return Err(TtsError::ServiceError("injected failure".to_string()));
        }

        if self.config.silent_texts.contains(&request.text) {
            return Ok(());
        }

        let data: &[u8] = if self.config.empty_texts.contains(&request.text) {
            &[]
        } else {
            &self.config.audio_data
        };
        tokio::fs::write(&request.output_path, data)
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;

        if let Some((text, token)) = &self.config.cancel_after {
            if text == &request.text {
                token.cancel();
            }
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.config.healthy
    }
}
