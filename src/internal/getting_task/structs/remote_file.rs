use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

/// 默认探测超时（10 秒）
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// 默认每个 host 保留的空闲连接数
pub const DEFAULT_MAX_IDLE_CONNS_PER_HOST: usize = 16;

/// 远程文件的探测配置，用于 [`GettingTask::create`](super::GettingTask::create)。
#[derive(Debug, Clone, Default)]
pub struct RemoteFile {
    /// 文件 URL，必填
    pub url: String,
    /// 探测请求（HEAD）的超时；为零时使用 10 秒
    pub timeout: Duration,
    /// User-Agent，为空则不设置该请求头
    pub useragent: String,
    /// Referer，为空则不设置该请求头
    pub referer: String,
    /// 每个 host 最多保留的空闲连接数；为 0 时使用 16
    pub max_idle_conns_per_host: usize,
    /// 取消令牌：取消后探测与分片下载都会中止；未设置时不可外部取消
    pub cancel: Option<CancellationToken>,
    /// 外部传入的 HTTP 客户端（连接池复用）；未设置时按 `max_idle_conns_per_host` 新建
    pub client: Option<Client>,
}

impl RemoteFile {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 补全默认值，返回规范化后的副本。
    pub fn standardize(&self) -> RemoteFile {
        let mut c = self.clone();
        if c.cancel.is_none() {
            c.cancel = Some(CancellationToken::new());
        }
        if c.max_idle_conns_per_host == 0 {
            c.max_idle_conns_per_host = DEFAULT_MAX_IDLE_CONNS_PER_HOST;
        }
        if c.timeout.is_zero() {
            c.timeout = DEFAULT_TIMEOUT;
        }
        c
    }
}
