//! Podcast Context - 拼接清单

use std::path::{Path, PathBuf};

use super::AudioSegment;

/// 拼接清单
///
/// 只包含合成成功的片段，按 `index` 升序排列。
/// 清单顺序 == 对话顺序，与合成完成的先后无关。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyManifest {
    entries: Vec<(usize, PathBuf)>,
}

impl AssemblyManifest {
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a AudioSegment>) -> Self {
        let mut entries: Vec<(usize, PathBuf)> = segments
            .into_iter()
            .filter(|s| s.is_synthesized())
            .map(|s| (s.index(), s.path().to_path_buf()))
            .collect();
        entries.sort_by_key(|(index, _)| *index);
        Self { entries }
    }

    /// 所有路径转为绝对路径（不要求文件存在）
    pub fn absolutize(self) -> std::io::Result<Self> {
        let entries = self
            .entries
            .into_iter()
            .map(|(index, path)| std::path::absolute(&path).map(|abs| (index, abs)))
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|(index, _)| *index).collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(_, path)| path.as_path())
    }

    /// 渲染为 ffmpeg concat demuxer 的列表格式
    ///
    /// 每行 `file '<path>'`，路径中的单引号写作 `'\''`
    pub fn to_concat_list(&self) -> String {
        let mut out = String::new();
        for path in self.paths() {
            let escaped = path.to_string_lossy().replace('\'', r"'\''");
            out.push_str(&format!("file '{}'\n", escaped));
        }
        out
    }
}
