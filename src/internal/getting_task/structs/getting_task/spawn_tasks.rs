//! 并发下载：每个待下载分片一个任务，等待全部完成或在首个失败时取消其余任务。

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::internal::progress::progress_reporter::ProgressReporter;

use super::super::download_error::DownloadError;
use super::super::segment_spec::SegmentSpec;
use super::RequestTemplate;
use super::download_one_part::{DownloadOnePartParams, download_one_part};

/// 并发下载时的参数（形参超过 3 个，用 struct 承载）。
pub(super) struct FetchSegmentsParams {
    pub request: RequestTemplate,
    pub segments: Vec<SegmentSpec>,
    pub whole_file: bool,
    /// 调用方的取消令牌；本阶段在其子令牌下运行
    pub cancel: CancellationToken,
    pub progress: Option<Arc<ProgressReporter>>,
}

/// 全部分片成功才返回 `Ok`；否则返回最先观察到的错误。
pub(super) async fn fetch_segments(params: FetchSegmentsParams) -> Result<(), DownloadError> {
    let token = params.cancel.child_token();
    let mut tasks = JoinSet::new();

    for segment in params.segments {
        tasks.spawn(download_one_part(DownloadOnePartParams {
            request: params.request.clone(),
            segment,
            whole_file: params.whole_file,
            cancel: token.clone(),
            progress: params.progress.clone(),
        }));
    }
    debug!(tasks = tasks.len(), "分片任务已启动");

    let mut first_error: Option<DownloadError> = None;
    while let Some(joined) = tasks.join_next().await {
        let result = joined.unwrap_or_else(|e| Err(DownloadError::TaskJoin(e)));
        if let Err(e) = result {
            if first_error.is_none() {
                warn!(error = %e, "分片下载失败，取消其余分片");
                token.cancel();
                first_error = Some(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
