//! Input Acquisition - 输入源 → 原始文本

use std::sync::Arc;

use crate::application::error::PipelineError;
use crate::application::ports::{SourceKind, SourceLoaderPort};
use crate::application::script_generator::ScriptGenerator;

/// 输入获取
///
/// 网页内容在有脚本生成器时会再经过一次正文提取
pub struct InputAcquirer {
    loader: Arc<dyn SourceLoaderPort>,
    script_generator: Option<Arc<ScriptGenerator>>,
}

impl InputAcquirer {
    pub fn new(
        loader: Arc<dyn SourceLoaderPort>,
        script_generator: Option<Arc<ScriptGenerator>>,
    ) -> Self {
        Self {
            loader,
            script_generator,
        }
    }

    pub async fn acquire(&self, source: &str) -> Result<String, PipelineError> {
        let kind = SourceKind::detect(source);
        tracing::info!(source = %source, kind = ?kind, "Acquiring input");

        let text = self.loader.load(source).await?;

        match (kind, &self.script_generator) {
            (SourceKind::WebPage, Some(generator)) => {
                Ok(generator.extract_main_content(&text).await)
            }
            _ => Ok(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SourceError;
    use async_trait::async_trait;

    struct StaticLoader(Result<String, ()>);

    #[async_trait]
    impl SourceLoaderPort for StaticLoader {
        async fn load(&self, source: &str) -> Result<String, SourceError> {
            self.0
                .clone()
                .map_err(|_| SourceError::FileNotFound(source.to_string()))
        }
    }

    #[tokio::test]
    async fn test_plain_source_passes_through() {
        let acquirer = InputAcquirer::new(Arc::new(StaticLoader(Ok("文本".into()))), None);
        assert_eq!(acquirer.acquire("input.txt").await.unwrap(), "文本");
    }

    #[tokio::test]
    async fn test_loader_error_maps_to_input_acquisition() {
        let acquirer = InputAcquirer::new(Arc::new(StaticLoader(Err(()))), None);
        let err = acquirer.acquire("missing.txt").await.unwrap_err();
        assert!(matches!(err, PipelineError::InputAcquisition(_)));
    }
}
