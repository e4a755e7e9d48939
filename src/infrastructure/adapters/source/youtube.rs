//! YouTube 字幕获取
//!
//! 通过 timedtext 接口取字幕轨：先找英文轨，找不到再取其他语言并机器翻译成英文

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

use super::html::decode_entities;
use crate::application::ports::{SourceError, SourceLoaderPort};

/// 直接可用的英文轨
const ENGLISH_LANGUAGES: &[&str] = &["en", "en-US", "en-GB"];
/// 需要翻译成英文的轨
const TRANSLATABLE_LANGUAGES: &[&str] = &["zh-CN", "zh", "ja", "ko"];

static TEXT_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b[^>]*>(.*?)</text>").unwrap());

/// 从各种 URL 形式中提取视频 ID
///
/// `youtu.be/<id>`、`watch?v=<id>`、`/embed/<id>`、`/v/<id>`，查询参数会被去掉
pub fn extract_video_id(url: &str) -> Option<String> {
    let id = if url.contains("youtu.be") {
        url.rsplit('/').next()?.split('?').next()
    } else if url.contains("youtube.com") {
        if let Some((_, rest)) = url.split_once("v=") {
            rest.split('&').next()
        } else if let Some((_, rest)) = url.split_once("/embed/") {
            rest.split('?').next()
        } else if let Some((_, rest)) = url.split_once("/v/") {
            rest.split('?').next()
        } else {
            None
        }
    } else {
        None
    }?;

    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// 解析 timedtext XML，返回非空字幕条目
pub fn parse_timedtext(xml: &str) -> Vec<String> {
    TEXT_ENTRY
        .captures_iter(xml)
        .map(|caps| {
            // 条目内容常被双重转义（&amp;#39;）
            let once = decode_entities(&caps[1]);
            decode_entities(&once).replace('\n', " ").trim().to_string()
        })
        .filter(|text| !text.is_empty())
        .collect()
}

pub struct YoutubeTranscriptLoader {
    client: Client,
    base_url: String,
}

impl YoutubeTranscriptLoader {
    pub fn new(timeout_secs: u64) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: "https://www.youtube.com".to_string(),
        })
    }

    /// 替换接口地址（测试用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_track(
        &self,
        video_id: &str,
        lang: &str,
        translate_to: Option<&str>,
    ) -> Result<Vec<String>, SourceError> {
        let mut query = vec![("v", video_id), ("lang", lang)];
        if let Some(target) = translate_to {
            query.push(("tlang", target));
        }

        let response = self
            .client
            .get(format!("{}/api/timedtext", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        // 没有该语言的轨时接口返回 404 或空内容
        if !response.status().is_success() {
            return Ok(Vec::new());
        }
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        Ok(parse_timedtext(&body))
    }
}

#[async_trait]
impl SourceLoaderPort for YoutubeTranscriptLoader {
    async fn load(&self, source: &str) -> Result<String, SourceError> {
        let video_id =
            extract_video_id(source).ok_or_else(|| SourceError::InvalidVideoUrl(source.to_string()))?;
        tracing::info!(video_id = %video_id, "Extracted video ID");

        for lang in ENGLISH_LANGUAGES {
            let entries = self.fetch_track(&video_id, lang, None).await?;
            if !entries.is_empty() {
                return Ok(entries.join("\n"));
            }
        }

        tracing::info!(video_id = %video_id, "No English transcript found, trying translated track");
        for lang in TRANSLATABLE_LANGUAGES {
            let entries = self.fetch_track(&video_id, lang, Some("en")).await?;
            if !entries.is_empty() {
                tracing::debug!(lang = %lang, "Using translated transcript");
                return Ok(entries.join("\n"));
            }
        }

        Err(SourceError::NoTranscript(video_id))
    }
}
