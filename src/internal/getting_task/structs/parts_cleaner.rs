//! 分片临时文件清理句柄，以及携带清理句柄的失败结果。

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use super::download_error::DownloadError;

/// 清理分片临时文件；可重复调用，文件不存在视为成功。
#[derive(Debug, Clone, Default)]
pub struct PartsCleaner {
    paths: Vec<PathBuf>,
}

impl PartsCleaner {
    pub(crate) fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// 空操作的清理句柄（下载成功时返回）。
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub async fn clean(&self) -> Result<(), DownloadError> {
        for path in &self.paths {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!(path = %path.display(), "已删除分片临时文件"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(DownloadError::RemoveTempFile(e)),
            }
        }
        Ok(())
    }
}

/// `get` 失败：错误本身 + 可选的清理句柄。
///
/// 不调用 [`GetFailure::clean`] 时临时文件保留，再次 `get` 会从已写入的位置续传。
#[derive(Debug, Error)]
#[error("{source}")]
pub struct GetFailure {
    #[source]
    source: DownloadError,
    cleaner: PartsCleaner,
}

impl GetFailure {
    pub(crate) fn new(source: DownloadError, cleaner: PartsCleaner) -> Self {
        Self { source, cleaner }
    }

    pub fn error(&self) -> &DownloadError {
        &self.source
    }

    pub fn cleaner(&self) -> &PartsCleaner {
        &self.cleaner
    }

    /// 放弃本次下载，删除临时文件。
    pub async fn clean(&self) -> Result<(), DownloadError> {
        self.cleaner.clean().await
    }

    pub fn into_parts(self) -> (DownloadError, PartsCleaner) {
        (self.source, self.cleaner)
    }
}
