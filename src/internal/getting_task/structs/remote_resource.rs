/// 探测得到的远程资源描述，创建后只读。
///
/// 只有声明了 `Accept-Ranges: bytes` 的资源才能通过探测，因此不单独记录该能力。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResource {
    pub url: String,
    /// 文件总大小（字节），恒大于 0
    pub content_length: u64,
    /// 来自 `Content-Disposition` 的建议文件名，无则为空
    pub filename: String,
}
