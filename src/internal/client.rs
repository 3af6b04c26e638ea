use reqwest::Client;

use crate::internal::getting_task::structs::DownloadError;

/// 创建下载用的 HTTP 客户端。
///
/// 只调整连接池大小；不开启自动解压，Range 的字节数必须与磁盘写入一致。
pub fn build_client(max_idle_conns_per_host: usize) -> Result<Client, DownloadError> {
    let client = Client::builder()
        .pool_max_idle_per_host(max_idle_conns_per_host)
        .build()?;
    Ok(client)
}
