//! 分片计划：切分字节区间，并根据本地临时文件计算续传起点。

use std::io::ErrorKind;

use tracing::debug;

use super::super::download_error::DownloadError;
use super::super::getting_config::GettingConfig;
use super::super::segment_spec::{DownloadPlan, SegmentSpec};

/// 把 `[0, content_length)` 切成最多 `parts` 段闭区间 `(begin, end)`。
///
/// 每段长度为 `content_length / parts`（截断），余数全部并入最后一段；
/// 分片数多于字节数时按字节数切分，保证不出现空区间。`content_length` 为 0 时返回空列表。
pub fn plan_ranges(content_length: u64, parts: usize) -> Vec<(u64, u64)> {
    if content_length == 0 {
        return Vec::new();
    }
    let n = (parts.max(1) as u64).min(content_length);
    let chunk = content_length / n;
    (0..n)
        .map(|i| {
            let begin = i * chunk;
            let end = if i == n - 1 {
                content_length - 1
            } else {
                begin + chunk - 1
            };
            (begin, end)
        })
        .collect()
}

pub(super) async fn plan_chunks(
    content_length: u64,
    config: &GettingConfig,
) -> Result<DownloadPlan, DownloadError> {
    let mut segments = Vec::new();

    for (index, (begin, end)) in plan_ranges(content_length, config.parts)
        .into_iter()
        .enumerate()
    {
        let file_path = config.part_file_path(index);
        let (range_begin, is_fresh_file) = match tokio::fs::metadata(&file_path).await {
            Ok(meta) => (begin + meta.len(), false),
            Err(e) if e.kind() == ErrorKind::NotFound => (begin, true),
            Err(e) => return Err(DownloadError::OpenFile(e)),
        };
        segments.push(SegmentSpec {
            index,
            origin_begin: begin,
            range_begin,
            range_end: end,
            file_path,
            is_fresh_file,
        });
    }

    let plan = DownloadPlan {
        content_length,
        segments,
    };
    debug!(
        segments = plan.segments.len(),
        pending = plan.pending().count(),
        resumed = plan
            .segments
            .iter()
            .filter(|s| !s.is_fresh_file && !s.is_complete())
            .count(),
        "分片计划完成"
    );
    Ok(plan)
}
