//! Script Generator - 原始素材 → 双人对话脚本
//!
//! 三次顺序的文本生成请求：大纲 → 扩写 → 对话化。
//! 任一阶段失败（或返回空内容）整条链中止。

use std::sync::Arc;

use crate::application::error::PipelineError;
use crate::application::ports::{GenerationRequest, TextGeneratorPort};
use crate::application::prompts::{
    render, DIALOGUE_PROMPT_TEMPLATE, EXPAND_PROMPT_TEMPLATE, EXTRACT_CONTENT_PROMPT_TEMPLATE,
    HOST_PROFILES, OUTLINE_PROMPT_TEMPLATE,
};

/// 生成阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Outline,
    Expansion,
    Dialogue,
    ContentExtraction,
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GenerationStage::Outline => "outline",
            GenerationStage::Expansion => "expansion",
            GenerationStage::Dialogue => "dialogue",
            GenerationStage::ContentExtraction => "content extraction",
        };
        f.write_str(name)
    }
}

/// 各阶段的 token 上限
#[derive(Debug, Clone)]
pub struct StageBudgets {
    pub outline: u32,
    pub full_script: u32,
    pub dialogue: u32,
}

impl Default for StageBudgets {
    fn default() -> Self {
        Self {
            outline: 8000,
            full_script: 8000,
            dialogue: 8000,
        }
    }
}

/// 脚本生成器
pub struct ScriptGenerator {
    generator: Arc<dyn TextGeneratorPort>,
    budgets: StageBudgets,
}

impl ScriptGenerator {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, budgets: StageBudgets) -> Self {
        Self { generator, budgets }
    }

    /// 生成对话脚本
    pub async fn generate(&self, input_text: &str) -> Result<String, PipelineError> {
        let outline = self
            .run_stage(
                GenerationStage::Outline,
                render(OUTLINE_PROMPT_TEMPLATE, &[("input_text", input_text)]),
                self.budgets.outline,
            )
            .await?;

        let full_script = self
            .run_stage(
                GenerationStage::Expansion,
                render(
                    EXPAND_PROMPT_TEMPLATE,
                    &[("outline", &outline), ("host_profiles", HOST_PROFILES)],
                ),
                self.budgets.full_script,
            )
            .await?;

        self.run_stage(
            GenerationStage::Dialogue,
            render(
                DIALOGUE_PROMPT_TEMPLATE,
                &[("full_script", &full_script), ("host_profiles", HOST_PROFILES)],
            ),
            self.budgets.dialogue,
        )
        .await
    }

    /// 从网页文本中提取正文
    ///
    /// 生成失败时退回到基础清洗，不报错
    pub async fn extract_main_content(&self, text: &str) -> String {
        let prompt = render(EXTRACT_CONTENT_PROMPT_TEMPLATE, &[("text", text)]);
        match self
            .run_stage(GenerationStage::ContentExtraction, prompt, self.budgets.outline)
            .await
        {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, "Content extraction failed, using basic cleanup");
                basic_cleanup(text)
            }
        }
    }

    async fn run_stage(
        &self,
        stage: GenerationStage,
        prompt: String,
        max_tokens: u32,
    ) -> Result<String, PipelineError> {
        tracing::info!(stage = %stage, max_tokens = max_tokens, "Generating");

        let request = GenerationRequest { prompt, max_tokens };
        let text = self.generator.generate(&request).await.map_err(|e| {
            tracing::error!(stage = %stage, error = %e, "Text generation failed");
            PipelineError::ScriptGeneration {
                stage,
                message: e.to_string(),
            }
        })?;

        if text.trim().is_empty() {
            return Err(PipelineError::ScriptGeneration {
                stage,
                message: "empty response".to_string(),
            });
        }

        tracing::debug!(stage = %stage, chars = text.chars().count(), "Stage completed");
        Ok(text)
    }
}

/// 基础文本清洗：逐行 trim，按双空格拆块，去掉空块
pub fn basic_cleanup(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
