//! 临时文件守卫
//!
//! 片段文件与清单文件在 Drop 时删除，覆盖成功、失败、取消（future 被丢弃）所有路径

use std::path::{Path, PathBuf};

use crate::domain::AudioSegment;

#[derive(Debug)]
pub struct ScratchFiles {
    paths: Vec<PathBuf>,
    armed: bool,
}

impl Default for ScratchFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl ScratchFiles {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            armed: true,
        }
    }

    /// 接管所有片段文件（包括失败但残留的文件）
    pub fn for_segments<'a>(segments: impl IntoIterator<Item = &'a AudioSegment>) -> Self {
        let mut scratch = Self::new();
        for segment in segments {
            scratch.track(segment.path());
        }
        scratch
    }

    pub fn track(&mut self, path: impl AsRef<Path>) {
        self.paths.push(path.as_ref().to_path_buf());
    }

    /// 放弃清理，返回保留下来的文件
    pub fn keep(mut self) -> Vec<PathBuf> {
        self.armed = false;
        std::mem::take(&mut self.paths)
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut removed = 0usize;
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp file");
                }
            }
        }

        if removed > 0 {
            tracing::debug!(removed = removed, "Temp files cleaned up");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_drop_removes_tracked_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("segment_0.mp3");
        let b = dir.path().join("concat.txt");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();

        {
            let mut scratch = ScratchFiles::new();
            scratch.track(&a);
            scratch.track(&b);
            // 不存在的文件不报错
            scratch.track(dir.path().join("segment_9.mp3"));
            assert_eq!(scratch.paths.len(), 3);
        }

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_keep_disarms_cleanup() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("segment_0.mp3");
        std::fs::write(&a, b"a").unwrap();

        let mut scratch = ScratchFiles::new();
        scratch.track(&a);
        let kept = scratch.keep();

        assert_eq!(kept, vec![a.clone()]);
        assert!(a.exists());
    }
}
