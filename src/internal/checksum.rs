//! SHA512 摘要：对单个文件，或按顺序对多个文件连续计算一个摘要。

use std::path::Path;

use sha2::{Digest, Sha512};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::internal::getting_task::structs::DownloadError;

const READ_BUF_SIZE: usize = 64 * 1024;

/// 计算文件的 SHA512，返回小写十六进制。
pub async fn sha512_of_file(path: impl AsRef<Path>) -> Result<String, DownloadError> {
    sha512_of_files(&[path]).await
}

/// 依次读取全部文件喂给同一个摘要器，结果等同于对拼接后的内容计算 SHA512。
pub async fn sha512_of_files<P: AsRef<Path>>(paths: &[P]) -> Result<String, DownloadError> {
    let mut hasher = Sha512::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];
    for path in paths {
        let mut file = File::open(path.as_ref())
            .await
            .map_err(DownloadError::OpenFile)?;
        loop {
            let n = file.read(&mut buf).await.map_err(DownloadError::ReadFile)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// 忽略大小写与首尾空白比较十六进制摘要。
pub(crate) fn digest_eq(expected: &str, actual: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(actual.trim())
}
