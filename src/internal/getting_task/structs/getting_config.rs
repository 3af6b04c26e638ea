use std::path::{Path, PathBuf};

use crate::internal::progress::ProgressListener;

/// 单次下载（[`GettingTask::get`](super::GettingTask::get)）的配置。
#[derive(Debug, Clone, Default)]
pub struct GettingConfig {
    /// 最终保存路径，必填
    pub file_path: PathBuf,
    /// 期望的 SHA512（十六进制）；为空则不校验
    pub sha512: String,
    /// 分片临时文件所在目录；为空时使用 `file_path` 所在目录
    pub parts_path: PathBuf,
    /// 分片临时文件的基础名；为空时使用 `file_path` 的文件名
    pub part_name: String,
    /// 分片数；为 0 时按 1 处理
    pub parts: usize,
    /// 进度监听；未设置则不产生任何进度事件
    pub listen_progress: Option<ProgressListener>,
}

impl GettingConfig {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    /// 补全默认值，返回规范化后的副本。
    pub fn standardize(&self) -> GettingConfig {
        let mut c = self.clone();
        if c.parts == 0 {
            c.parts = 1;
        }
        if c.part_name.is_empty() {
            c.part_name = c.file_name();
        }
        if c.parts_path.as_os_str().is_empty() {
            c.parts_path = c.dir_path();
        }
        c
    }

    pub(crate) fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub(crate) fn dir_path(&self) -> PathBuf {
        match self.file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// 分片临时文件名。单分片为 `<part_name>.downloading`，
    /// 多分片为 `<part_name>.<parts>.<index>.downloading`；跨次运行保持不变，续传靠它定位旧文件。
    pub fn part_file_name(&self, index: usize) -> String {
        if self.parts <= 1 {
            format!("{}.downloading", self.part_name)
        } else {
            format!("{}.{}.{}.downloading", self.part_name, self.parts, index)
        }
    }

    pub(crate) fn part_file_path(&self, index: usize) -> PathBuf {
        Path::new(&self.parts_path).join(self.part_file_name(index))
    }

    /// 全部分片临时文件路径，按分片序号排列。
    pub(crate) fn part_file_paths(&self) -> Vec<PathBuf> {
        (0..self.parts.max(1)).map(|i| self.part_file_path(i)).collect()
    }
}
