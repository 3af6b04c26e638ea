//! 单个分片的下载：请求、流式写入临时文件、统计实际写入字节数。

use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::header::RANGE;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::internal::progress::progress_reporter::{ProgressReporter, report};

use super::super::download_error::DownloadError;
use super::super::segment_spec::SegmentSpec;
use super::RequestTemplate;

/// 下载单个分片时的参数（形参超过 3 个，用 struct 承载）。
pub(super) struct DownloadOnePartParams {
    pub request: RequestTemplate,
    pub segment: SegmentSpec,
    /// 整个文件只有一个分片
    pub whole_file: bool,
    pub cancel: CancellationToken,
    pub progress: Option<Arc<ProgressReporter>>,
}

/// 下载一个分片。写入字节数少于区间长度时返回 [`DownloadError::ShortWrite`]，已写入部分留在磁盘上供续传。
pub(super) async fn download_one_part(
    params: DownloadOnePartParams,
) -> Result<(), DownloadError> {
    let DownloadOnePartParams {
        request,
        segment,
        whole_file,
        cancel,
        progress,
    } = params;

    let mut req = request.get();
    // 单分片且从零开始时按整文件请求，其余情况（包括单分片续传）都带 Range
    if !(whole_file && segment.is_fresh_file) {
        req = req.header(RANGE, segment.range_header());
    }
    debug!(
        index = segment.index,
        begin = segment.range_begin,
        end = segment.range_end,
        fresh = segment.is_fresh_file,
        "开始下载分片"
    );

    let resp = tokio::select! {
        _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
        resp = req.send() => resp?,
    };
    let resp = resp.error_for_status()?;

    let mut file = open_part_file(&segment).await?;
    let copied = copy_body(resp, &mut file, &cancel, progress.as_ref()).await;
    file.flush().await.map_err(DownloadError::FlushFile)?;
    let written = copied?;

    let expected = segment.remaining();
    if written < expected {
        return Err(DownloadError::ShortWrite {
            index: segment.index,
            expected,
            written,
        });
    }
    debug!(index = segment.index, written, "分片下载完成");
    Ok(())
}

/// 新文件截断创建，续传则以追加方式打开。
async fn open_part_file(segment: &SegmentSpec) -> Result<File, DownloadError> {
    if segment.is_fresh_file {
        File::create(&segment.file_path)
            .await
            .map_err(DownloadError::CreateFile)
    } else {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&segment.file_path)
            .await
            .map_err(DownloadError::OpenFile)
    }
}

/// 流式读取响应体写入文件，返回写入的字节数。
async fn copy_body(
    resp: reqwest::Response,
    file: &mut File,
    cancel: &CancellationToken,
    progress: Option<&Arc<ProgressReporter>>,
) -> Result<u64, DownloadError> {
    let mut stream = resp.bytes_stream();
    let mut written: u64 = 0;

    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
            chunk = stream.next() => chunk,
        };
        let Some(chunk) = chunk else {
            break;
        };
        let chunk = chunk?;
        if chunk.is_empty() {
            continue;
        }
        file.write_all(&chunk)
            .await
            .map_err(DownloadError::WriteFile)?;
        written += chunk.len() as u64;
        report(progress, chunk.len() as u64);
    }
    Ok(written)
}
