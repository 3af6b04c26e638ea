//! 合并：校验整体摘要后，把分片临时文件按序号写入目标文件。

use std::path::Path;
use std::sync::Arc;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::internal::checksum::{digest_eq, sha512_of_files};
use crate::internal::progress::progress_reporter::{ProgressReporter, report};

use super::super::download_error::DownloadError;
use super::super::getting_config::GettingConfig;
use super::super::segment_spec::DownloadPlan;

const COPY_BUF_SIZE: usize = 64 * 1024;

/// 合并时的参数
pub(super) struct MergePartsParams<'a> {
    pub plan: &'a DownloadPlan,
    pub config: &'a GettingConfig,
    pub progress: Option<&'a Arc<ProgressReporter>>,
}

/// 摘要不一致时不会创建或改动目标文件。
///
/// 多分片拼接中途失败时，目标文件可能只写了一部分，临时文件保留。
pub(super) async fn merge_parts(params: MergePartsParams<'_>) -> Result<(), DownloadError> {
    let MergePartsParams {
        plan,
        config,
        progress,
    } = params;

    tokio::fs::create_dir_all(config.dir_path())
        .await
        .map_err(DownloadError::CreateDir)?;

    let part_paths = plan.part_paths();

    if !config.sha512.is_empty() {
        let actual = sha512_of_files(&part_paths).await?;
        if !digest_eq(&config.sha512, &actual) {
            return Err(DownloadError::HashMismatch {
                expected: config.sha512.clone(),
                actual,
            });
        }
        debug!("SHA512 校验通过");
    }

    if let [only] = part_paths.as_slice() {
        info!(from = %only.display(), to = %config.file_path.display(), "单分片，直接改名");
        tokio::fs::rename(only, &config.file_path)
            .await
            .map_err(DownloadError::MoveFile)?;
        return Ok(());
    }

    info!(parts = part_paths.len(), to = %config.file_path.display(), "拼接分片");
    let mut target = File::create(&config.file_path)
        .await
        .map_err(DownloadError::CreateFile)?;
    for path in &part_paths {
        copy_part(path, &mut target, progress).await?;
    }
    target.flush().await.map_err(DownloadError::FlushFile)?;
    Ok(())
}

async fn copy_part(
    path: &Path,
    target: &mut File,
    progress: Option<&Arc<ProgressReporter>>,
) -> Result<u64, DownloadError> {
    let mut part = File::open(path).await.map_err(DownloadError::OpenFile)?;
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut copied: u64 = 0;
    loop {
        let n = part.read(&mut buf).await.map_err(DownloadError::ReadFile)?;
        if n == 0 {
            break;
        }
        target
            .write_all(&buf[..n])
            .await
            .map_err(DownloadError::WriteFile)?;
        copied += n as u64;
        report(progress, n as u64);
    }
    debug!(part = %path.display(), copied, "分片已写入目标文件");
    Ok(copied)
}
