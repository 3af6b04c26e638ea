//! 下载相关错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("URL 格式错误: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("服务器不支持 Range 请求")]
    RangeNotSupported,

    #[error("无效的文件长度: {0}")]
    InvalidContentLength(i64),

    /// 分片实际写入的字节数少于 Range 长度；临时文件保留，可再次调用续传。
    #[error("分片 {index} 下载字节数少于预期: 期望 {expected}，实际 {written}")]
    ShortWrite {
        index: usize,
        expected: u64,
        written: u64,
    },

    /// 合并前的整体摘要与期望值不一致；临时文件保留，目标文件不会被写入。
    #[error("SHA512 校验失败: 期望 {expected}，实际 {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("创建目录失败: {0}")]
    CreateDir(std::io::Error),

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("打开文件失败: {0}")]
    OpenFile(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("读取文件失败: {0}")]
    ReadFile(std::io::Error),

    #[error("刷新文件失败: {0}")]
    FlushFile(std::io::Error),

    #[error("移动文件失败: {0}")]
    MoveFile(std::io::Error),

    #[error("删除临时文件失败: {0}")]
    RemoveTempFile(std::io::Error),

    #[error("下载被取消")]
    Cancelled,

    #[error("分片任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// 错误分类：区分能力不足、网络问题、完整性问题、本地文件系统问题与请求构造错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 远程资源不支持分段下载或长度无效，重试无意义
    Capability,
    /// 网络、DNS、TLS、超时等传输层失败
    Transport,
    /// 分片字节数不足
    ShortWrite,
    /// 整体摘要不一致
    HashMismatch,
    /// 目录创建、打开、读写、移动、删除失败
    Filesystem,
    /// 调用方主动取消
    Cancelled,
    /// URL 或请求本身构造失败，未发出请求
    InvalidRequest,
    /// 分片任务 panic 或被中止
    Internal,
}

impl DownloadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DownloadError::RangeNotSupported | DownloadError::InvalidContentLength(_) => {
                ErrorKind::Capability
            }
            DownloadError::InvalidUrl(_) => ErrorKind::InvalidRequest,
            DownloadError::Request(e) if e.is_builder() => ErrorKind::InvalidRequest,
            DownloadError::Request(_) => ErrorKind::Transport,
            DownloadError::TaskJoin(_) => ErrorKind::Internal,
            DownloadError::ShortWrite { .. } => ErrorKind::ShortWrite,
            DownloadError::HashMismatch { .. } => ErrorKind::HashMismatch,
            DownloadError::CreateDir(_)
            | DownloadError::CreateFile(_)
            | DownloadError::OpenFile(_)
            | DownloadError::WriteFile(_)
            | DownloadError::ReadFile(_)
            | DownloadError::FlushFile(_)
            | DownloadError::MoveFile(_)
            | DownloadError::RemoveTempFile(_) => ErrorKind::Filesystem,
            DownloadError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// 再次调用 `get` 是否能基于已写入的临时文件继续下载。
    pub fn is_resumable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Transport | ErrorKind::ShortWrite | ErrorKind::Cancelled
        )
    }
}
