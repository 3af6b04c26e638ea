//! 分段下载任务
//!
//! 本模块实现基于 HTTP Range 的可续传分段下载，一个任务对应一个远程文件。
//!
//! ## 流程
//!
//! 1. **探测**（[`GettingTask::create`]）：发送 HEAD，要求 `Accept-Ranges: bytes` 且长度大于 0
//! 2. **分片计划**：按分片数切分 `[0, content_length)`，余数全部归最后一片；
//!    已存在的临时文件大小叠加到起点上，已完整的分片不再请求
//! 3. **并发下载**：每个待下载分片一个任务，共享同一个取消令牌，任一分片失败即取消其余分片
//! 4. **合并**：可选的 SHA512 校验通过后，单分片直接改名，多分片按序号拼接到目标文件
//! 5. **清理**：合并成功后删除临时文件；失败时保留，再次 `get` 即可续传
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use ranged_get::task::{GettingConfig, GettingTask, RemoteFile};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let task = GettingTask::create(&RemoteFile::new("https://example.com/big.iso")).await?;
//!
//! let config = GettingConfig {
//!     parts: 4,
//!     ..GettingConfig::new("downloads/big.iso")
//! };
//! match task.get(&config).await {
//!     Ok(_) => println!("完成"),
//!     // 放弃时删除临时文件；不删除则下次从断点继续
//!     Err(failure) => failure.clean().await?,
//! }
//! # Ok(())
//! # }
//! ```

mod chunk_plan;
mod download_one_part;
mod merge;
mod probe;
mod spawn_tasks;

use reqwest::{Client, RequestBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::internal::progress::progress_reporter::ProgressReporter;

use super::download_error::DownloadError;
use super::getting_config::GettingConfig;
use super::parts_cleaner::{GetFailure, PartsCleaner};
use super::remote_file::RemoteFile;
use super::remote_resource::RemoteResource;
use super::segment_spec::{DownloadPlan, SegmentSpec};

pub use chunk_plan::plan_ranges;
pub use probe::parse_content_disposition_filename;

use merge::{MergePartsParams, merge_parts};
use spawn_tasks::{FetchSegmentsParams, fetch_segments};

/// 构造同一资源的 GET 请求；可跨任务克隆。
#[derive(Debug, Clone)]
pub(crate) struct RequestTemplate {
    pub(crate) client: Client,
    pub(crate) url: String,
    pub(crate) useragent: String,
    pub(crate) referer: String,
}

impl RequestTemplate {
    pub(crate) fn get(&self) -> RequestBuilder {
        apply_headers(self.client.get(&self.url), &self.useragent, &self.referer)
    }
}

/// 设置可选的 User-Agent 与 Referer，空字符串表示不设置。
pub(crate) fn apply_headers(
    mut builder: RequestBuilder,
    useragent: &str,
    referer: &str,
) -> RequestBuilder {
    if !useragent.is_empty() {
        builder = builder.header(reqwest::header::USER_AGENT, useragent);
    }
    if !referer.is_empty() {
        builder = builder.header(reqwest::header::REFERER, referer);
    }
    builder
}

/// 分段下载任务，由 [`GettingTask::create`] 探测远程文件后得到。
#[derive(Debug)]
pub struct GettingTask {
    pub(crate) request: RequestTemplate,
    pub(crate) resource: RemoteResource,
    pub(crate) cancel: CancellationToken,
}

impl GettingTask {
    /// 探测远程文件：不支持 Range 或长度无效时直接失败，不会发起任何下载。
    pub async fn create(config: &RemoteFile) -> Result<Self, DownloadError> {
        probe::probe(config).await
    }

    pub fn content_length(&self) -> u64 {
        self.resource.content_length
    }

    /// 服务器建议的文件名，没有则为空字符串。
    pub fn filename(&self) -> &str {
        &self.resource.filename
    }

    pub fn url(&self) -> &str {
        &self.resource.url
    }

    pub fn resource(&self) -> &RemoteResource {
        &self.resource
    }

    /// 根据本地临时文件计算分片计划（不发起网络请求）。
    pub async fn plan(&self, config: &GettingConfig) -> Result<DownloadPlan, DownloadError> {
        chunk_plan::plan_chunks(self.resource.content_length, &config.standardize()).await
    }

    /// 执行下载并合并到 `config.file_path`。
    ///
    /// 成功时返回的清理句柄为空操作；失败时 [`GetFailure`] 携带的句柄可删除临时文件，
    /// 不删除则再次调用本方法会从断点续传。
    pub async fn get(&self, config: &GettingConfig) -> Result<PartsCleaner, GetFailure> {
        let c = config.standardize();
        let cleaner = PartsCleaner::new(c.part_file_paths());

        match self.run(&c, &cleaner).await {
            Ok(()) => Ok(PartsCleaner::noop()),
            Err(e) => {
                warn!(url = %self.resource.url, error = %e, "下载失败");
                Err(GetFailure::new(e, cleaner))
            }
        }
    }

    async fn run(&self, c: &GettingConfig, cleaner: &PartsCleaner) -> Result<(), DownloadError> {
        let total = self.resource.content_length;
        let plan = chunk_plan::plan_chunks(total, c).await?;
        let pending: Vec<SegmentSpec> = plan.pending().cloned().collect();
        let whole_file = plan.segments.len() == 1;

        let progress = ProgressReporter::downloading(total, c.listen_progress.as_ref());

        if !pending.is_empty() {
            tokio::fs::create_dir_all(&c.parts_path)
                .await
                .map_err(DownloadError::CreateDir)?;

            fetch_segments(FetchSegmentsParams {
                request: self.request.clone(),
                segments: pending,
                whole_file,
                cancel: self.cancel.clone(),
                progress: progress.clone(),
            })
            .await?;
        }

        let coping = progress.as_ref().map(|p| p.to_coping());
        merge_parts(MergePartsParams {
            plan: &plan,
            config: c,
            progress: coping.as_ref(),
        })
        .await?;

        cleaner.clean().await?;
        info!(path = %c.file_path.display(), total, "下载完成");

        if let Some(p) = coping {
            p.fire_done();
        }
        Ok(())
    }
}
