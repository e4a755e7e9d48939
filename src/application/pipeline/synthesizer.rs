//! Segment Synthesizer - 逐行语音合成
//!
//! 每行对话是独立的工作单元。并发时结果写入按位置寻址的槽位数组，
//! 完成顺序不影响最终顺序（组装时按 index 排序）。

use futures_util::{future, pin_mut, stream, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{SynthesisRequest, TtsEnginePort};
use crate::domain::{AudioSegment, DialogueLine, VoiceMapping, VoiceProfile};

/// 合成配置
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// 片段文件扩展名（与合成引擎的输出格式一致）
    pub extension: String,
    /// 最大并发合成数，1 表示严格顺序
    pub max_concurrent: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            extension: "mp3".to_string(),
            max_concurrent: 1,
        }
    }
}

/// 一批合成结果
#[derive(Debug)]
pub struct SynthesisBatch {
    /// 已派发的片段，按对话顺序
    pub segments: Vec<AudioSegment>,
    /// 取消后没有派发的行数
    pub not_attempted: usize,
    pub cancelled: bool,
}

impl SynthesisBatch {
    pub fn synthesized_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_synthesized()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.segments.len() - self.synthesized_count()
    }
}

/// 片段合成器
pub struct SegmentSynthesizer {
    tts_engine: Arc<dyn TtsEnginePort>,
    config: SynthesizerConfig,
}

impl SegmentSynthesizer {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, config: SynthesizerConfig) -> Self {
        Self { tts_engine, config }
    }

    /// 片段文件路径：`segment_<index>.<ext>`
    pub fn segment_path(&self, output_dir: &Path, index: usize) -> PathBuf {
        output_dir.join(format!("segment_{}.{}", index, self.config.extension))
    }

    /// 合成引擎是否可用
    pub async fn check_ready(&self) -> bool {
        self.tts_engine.health_check().await
    }

    /// 合成单行
    ///
    /// 失败（引擎报错、输出文件缺失或为空）只体现在片段状态上，不会返回错误
    pub async fn synthesize(
        &self,
        line: &DialogueLine,
        voice: &VoiceProfile,
        destination: &Path,
    ) -> AudioSegment {
        let mut segment = AudioSegment::pending(line, destination.to_path_buf());

        let request = SynthesisRequest {
            text: line.text.clone(),
            voice: voice.as_str().to_string(),
            output_path: destination.to_path_buf(),
        };

        let outcome = match clear_destination(destination).await {
            Err(reason) => Err(reason),
            Ok(()) => match self.tts_engine.synthesize(&request).await {
                Ok(()) => verify_output(destination).await,
                Err(e) => Err(format!("TTS error: {}", e)),
            },
        };

        let transition = match outcome {
            Ok(size) => {
                tracing::info!(
                    index = line.index,
                    speaker = %line.speaker_label,
                    voice = %voice,
                    size = size,
                    path = %destination.display(),
                    "Generated segment"
                );
                segment.mark_synthesized()
            }
            Err(reason) => {
                tracing::warn!(
                    index = line.index,
                    speaker = %line.speaker_label,
                    error = %reason,
                    "Segment synthesis failed"
                );
                segment.mark_failed(reason)
            }
        };

        if let Err(e) = transition {
            tracing::error!(index = line.index, error = %e, "Segment state transition rejected");
        }

        segment
    }

    /// 合成所有行
    ///
    /// 最多 `max_concurrent` 个合成同时进行。每次派发新行之前检查取消信号，
    /// 已经派发的行会跑完。
    pub async fn synthesize_all(
        &self,
        lines: &[DialogueLine],
        voices: &VoiceMapping,
        output_dir: &Path,
        cancel: &CancellationToken,
    ) -> SynthesisBatch {
        let mut slots: Vec<Option<AudioSegment>> = (0..lines.len()).map(|_| None).collect();
        let max_concurrent = self.config.max_concurrent.max(1);

        let results = stream::iter(lines.iter().enumerate())
            .take_while(|_| future::ready(!cancel.is_cancelled()))
            .map(|(slot, line)| {
                let voice = voices.resolve(line.speaker);
                let destination = self.segment_path(output_dir, line.index);
                async move { (slot, self.synthesize(line, voice, &destination).await) }
            })
            .buffer_unordered(max_concurrent);
        pin_mut!(results);

        while let Some((slot, segment)) = results.next().await {
            debug_assert!(slots[slot].is_none(), "slot written twice");
            slots[slot] = Some(segment);
        }

        let not_attempted = slots.iter().filter(|s| s.is_none()).count();
        let cancelled = cancel.is_cancelled();
        if cancelled {
            tracing::warn!(not_attempted = not_attempted, "Synthesis cancelled");
        }

        SynthesisBatch {
            segments: slots.into_iter().flatten().collect(),
            not_attempted,
            cancelled,
        }
    }
}

/// 删除上次运行留下的同名片段，保证校验的是本次输出
async fn clear_destination(path: &Path) -> Result<(), String> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!(
            "cannot remove stale output {}: {}",
            path.display(),
            e
        )),
    }
}

/// 检查输出文件存在且非空，返回文件大小
async fn verify_output(path: &Path) -> Result<u64, String> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.len() > 0 => Ok(meta.len()),
        Ok(_) => Err(format!("output file is empty: {}", path.display())),
        Err(e) => Err(format!("output file missing: {}: {}", path.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SegmentStatus, Speaker};
    use crate::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig};
    use std::time::Duration;
    use tempfile::tempdir;

    fn lines() -> Vec<DialogueLine> {
        vec![
            DialogueLine::new(0, Speaker::Host1, "Rachel", "你好"),
            DialogueLine::new(2, Speaker::Host2, "Mike", "大家好"),
            DialogueLine::new(5, Speaker::Unrecognized, "Guest", "再见"),
        ]
    }

    fn synthesizer(tts: Arc<FakeTtsClient>, max_concurrent: usize) -> SegmentSynthesizer {
        SegmentSynthesizer::new(
            tts,
            SynthesizerConfig {
                extension: "mp3".to_string(),
                max_concurrent,
            },
        )
    }

    #[test]
    fn test_segment_path_naming() {
        let tts = Arc::new(FakeTtsClient::with_defaults());
        let synth = synthesizer(tts, 1);
        assert_eq!(
            synth.segment_path(Path::new("/out"), 12),
            PathBuf::from("/out/segment_12.mp3")
        );
    }

    #[tokio::test]
    async fn test_synthesize_success() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::with_defaults());
        let synth = synthesizer(tts.clone(), 1);
        let line = &lines()[1];
        let dest = synth.segment_path(dir.path(), line.index);

        let segment = synth.synthesize(line, &VoiceProfile::male(), &dest).await;

        assert_eq!(segment.status(), SegmentStatus::Synthesized);
        assert!(dest.exists());
        let calls = tts.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].voice, "zh-CN-YunxiNeural");
        assert_eq!(calls[0].text, "大家好");
    }

    #[tokio::test]
    async fn test_engine_error_marks_failed() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::new(
            FakeTtsClientConfig::default().fail_on("大家好"),
        ));
        let synth = synthesizer(tts, 1);
        let line = &lines()[1];
        let dest = synth.segment_path(dir.path(), line.index);

        let segment = synth.synthesize(line, &VoiceProfile::male(), &dest).await;

        assert_eq!(segment.status(), SegmentStatus::Failed);
        assert!(segment.error_message().unwrap().contains("TTS error"));
    }

    #[tokio::test]
    async fn test_empty_output_marks_failed() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::new(
            FakeTtsClientConfig::default().empty_on("你好"),
        ));
        let synth = synthesizer(tts, 1);
        let line = &lines()[0];
        let dest = synth.segment_path(dir.path(), line.index);

        let segment = synth.synthesize(line, &VoiceProfile::female(), &dest).await;

        assert_eq!(segment.status(), SegmentStatus::Failed);
        assert!(segment.error_message().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_stale_segment_from_previous_run_is_not_reused() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::new(
            FakeTtsClientConfig::default().silent_on("大家好"),
        ));
        let synth = synthesizer(tts, 1);
        let line = &lines()[1];
        let dest = synth.segment_path(dir.path(), line.index);
        std::fs::write(&dest, b"OLD RUN AUDIO").unwrap();

        let segment = synth.synthesize(line, &VoiceProfile::male(), &dest).await;

        assert_eq!(segment.status(), SegmentStatus::Failed);
        assert!(segment.error_message().unwrap().contains("missing"));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_stale_segment_is_overwritten_by_fresh_output() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::with_defaults());
        let synth = synthesizer(tts, 1);
        let line = &lines()[0];
        let dest = synth.segment_path(dir.path(), line.index);
        std::fs::write(&dest, b"OLD RUN AUDIO").unwrap();

        let segment = synth.synthesize(line, &VoiceProfile::female(), &dest).await;

        assert_eq!(segment.status(), SegmentStatus::Synthesized);
        assert_eq!(std::fs::read(&dest).unwrap(), b"ID3fake-mp3-frame");
    }

    #[tokio::test]
    async fn test_synthesize_all_uses_voice_mapping() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::with_defaults());
        let synth = synthesizer(tts.clone(), 1);

        let batch = synth
            .synthesize_all(
                &lines(),
                &VoiceMapping::default(),
                dir.path(),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(batch.synthesized_count(), 3);
        assert!(!batch.cancelled);
        let voices: Vec<String> = tts.calls().into_iter().map(|c| c.voice).collect();
        assert_eq!(
            voices,
            vec!["zh-CN-XiaoxiaoNeural", "zh-CN-YunxiNeural", "zh-CN-XiaoxiaoNeural"]
        );
    }

    #[tokio::test]
    async fn test_concurrent_results_keep_slot_order() {
        let dir = tempdir().unwrap();
        // 第一行最慢，最后完成
        let tts = Arc::new(FakeTtsClient::new(
            FakeTtsClientConfig::default()
                .delay_on("你好", Duration::from_millis(80))
                .delay_on("大家好", Duration::from_millis(40)),
        ));
        let synth = synthesizer(tts.clone(), 3);

        let batch = synth
            .synthesize_all(
                &lines(),
                &VoiceMapping::default(),
                dir.path(),
                &CancellationToken::new(),
            )
            .await;

        let completion: Vec<String> = tts.calls().into_iter().map(|c| c.text).collect();
        assert_eq!(completion, vec!["再见", "大家好", "你好"]);

        let indices: Vec<usize> = batch.segments.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 2, 5]);
    }

    #[tokio::test]
    async fn test_cancel_before_dispatch() {
        let dir = tempdir().unwrap();
        let tts = Arc::new(FakeTtsClient::with_defaults());
        let synth = synthesizer(tts.clone(), 1);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let batch = synth
            .synthesize_all(&lines(), &VoiceMapping::default(), dir.path(), &cancel)
            .await;

        assert!(batch.cancelled);
        assert!(batch.segments.is_empty());
        assert_eq!(batch.not_attempted, 3);
        assert!(tts.calls().is_empty());
    }
}
