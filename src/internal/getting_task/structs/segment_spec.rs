//! 分片计划：每个分片拥有的字节区间、临时文件，以及续传起点。

use std::path::PathBuf;

/// 单个分片。`range_begin` 已叠加本地临时文件的大小。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    pub index: usize,
    /// 该分片在整体中的原始起点（未叠加续传偏移）
    pub origin_begin: u64,
    /// 本次请求的起点（含）
    pub range_begin: u64,
    /// 区间终点（含）
    pub range_end: u64,
    pub file_path: PathBuf,
    /// 临时文件不存在，需新建
    pub is_fresh_file: bool,
}

impl SegmentSpec {
    /// 本地临时文件已覆盖整个区间。
    pub fn is_complete(&self) -> bool {
        self.range_begin > self.range_end
    }

    /// 本次还需下载的字节数。
    pub fn remaining(&self) -> u64 {
        if self.is_complete() {
            0
        } else {
            self.range_end - self.range_begin + 1
        }
    }

    /// 已在本地的字节数。
    pub fn downloaded(&self) -> u64 {
        self.range_begin - self.origin_begin
    }

    pub(crate) fn range_header(&self) -> String {
        format!("bytes={}-{}", self.range_begin, self.range_end)
    }
}

/// 一次 `get` 的完整分片计划；每次调用时重新计算，不落盘。
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub content_length: u64,
    pub segments: Vec<SegmentSpec>,
}

impl DownloadPlan {
    /// 仍需下载的分片（已完整的分片只参与合并）。
    pub fn pending(&self) -> impl Iterator<Item = &SegmentSpec> {
        self.segments.iter().filter(|s| !s.is_complete())
    }

    pub fn part_paths(&self) -> Vec<PathBuf> {
        self.segments.iter().map(|s| s.file_path.clone()).collect()
    }
}
