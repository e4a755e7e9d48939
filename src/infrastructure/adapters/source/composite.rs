//! 按输入类型分发到具体加载器

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{SourceError, SourceKind, SourceLoaderPort};

pub struct CompositeSourceLoader {
    local: Arc<dyn SourceLoaderPort>,
    web: Arc<dyn SourceLoaderPort>,
    video: Arc<dyn SourceLoaderPort>,
}

impl CompositeSourceLoader {
    pub fn new(
        local: Arc<dyn SourceLoaderPort>,
        web: Arc<dyn SourceLoaderPort>,
        video: Arc<dyn SourceLoaderPort>,
    ) -> Self {
        Self { local, web, video }
    }
}

#[async_trait]
impl SourceLoaderPort for CompositeSourceLoader {
    async fn load(&self, source: &str) -> Result<String, SourceError> {
        match SourceKind::detect(source) {
            SourceKind::LocalFile => self.local.load(source).await,
            SourceKind::WebPage => self.web.load(source).await,
            SourceKind::Video => self.video.load(source).await,
        }
    }
}
