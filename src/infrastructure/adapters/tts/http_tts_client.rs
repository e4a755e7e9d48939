//! HTTP TTS Client - 调用外部 TTS HTTP 服务
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用外部 TTS 服务并把返回的音频写入目标文件
//!
//! 外部 TTS API:
//! POST http://localhost:8000/api/tts/infer
//! Request: {"text": "...", "voice": "zh-CN-XiaoxiaoNeural"}  (JSON)
//! Response: audio binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};

/// TTS 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 重试次数（仅网络错误/超时）
    pub max_retries: u32,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取推理 URL
    fn infer_url(&self) -> String {
        format!("{}/api/tts/infer", self.config.base_url.trim_end_matches('/'))
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }

    async fn request_audio(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let body = TtsHttpRequest {
            text: &request.text,
            voice: &request.voice,
        };

        let response = self
            .client
            .post(self.infer_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TtsError::VoiceNotFound(request.voice.clone()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        Ok(audio.to_vec())
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), TtsError> {
        tracing::debug!(
            url = %self.infer_url(),
            text_len = request.text.len(),
            voice = %request.voice,
            "Sending TTS infer request"
        );

        let mut attempt = 0;
        let audio = loop {
            match self.request_audio(request).await {
                Ok(audio) => break audio,
                Err(e @ (TtsError::Timeout | TtsError::NetworkError(_)))
                    if attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(attempt = attempt, error = %e, "Retrying TTS request");
                }
                Err(e) => return Err(e),
            }
        };

        tokio::fs::write(&request.output_path, &audio)
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;

        tracing::debug!(
            audio_size = audio.len(),
            output = %request.output_path.display(),
            "TTS inference completed"
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTtsClientConfig::new("http://example.com:9000/")
            .with_timeout(60)
            .with_retries(2);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 2);

        let client = HttpTtsClient::new(config).unwrap();
        assert_eq!(client.infer_url(), "http://example.com:9000/api/tts/infer");
    }
}
