use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::internal::getting_task::structs::{
    GetFailure, GettingConfig, GettingTask, PartsCleaner, RemoteFile,
};
use crate::internal::progress::ProgressListener;

/// 一次性下载入口：探测与下载合并为一次调用。
///
/// 各字段含义与 [`RemoteFile`]、[`GettingConfig`] 一致，未设置的字段使用其默认值。
///
/// example:
/// ```no_run
/// use ranged_get::RangeGet;
///
/// # async fn run() {
/// let result = RangeGet {
///     url: "https://example.com/big.iso".to_string(),
///     file_path: "downloads/big.iso".into(),
///     parts: 4,
///     ..Default::default()
/// }
/// .get()
/// .await;
///
/// if let Err(failure) = result {
///     eprintln!("下载失败：{}", failure);
/// }
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeGet {
    pub url: String,
    pub file_path: PathBuf,
    pub cancel: Option<CancellationToken>,
    pub timeout: Duration,
    pub useragent: String,
    pub referer: String,
    pub max_idle_conns_per_host: usize,
    pub client: Option<Client>,
    pub sha512: String,
    pub parts_path: PathBuf,
    pub part_name: String,
    pub parts: usize,
    pub listen_progress: Option<ProgressListener>,
}

impl RangeGet {
    /// 探测失败时没有任何临时文件，返回的清理句柄为空操作。
    pub async fn get(&self) -> Result<PartsCleaner, GetFailure> {
        let task = GettingTask::create(&self.remote_file())
            .await
            .map_err(|e| GetFailure::new(e, PartsCleaner::noop()))?;
        task.get(&self.getting_config()).await
    }

    fn remote_file(&self) -> RemoteFile {
        RemoteFile {
            url: self.url.clone(),
            timeout: self.timeout,
            useragent: self.useragent.clone(),
            referer: self.referer.clone(),
            max_idle_conns_per_host: self.max_idle_conns_per_host,
            cancel: self.cancel.clone(),
            client: self.client.clone(),
        }
    }

    fn getting_config(&self) -> GettingConfig {
        GettingConfig {
            file_path: self.file_path.clone(),
            sha512: self.sha512.clone(),
            parts_path: self.parts_path.clone(),
            part_name: self.part_name.clone(),
            parts: self.parts,
            listen_progress: self.listen_progress.clone(),
        }
    }
}
