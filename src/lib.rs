/// 内部实现模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口
pub use internal::entrance::remote::*;

/// 分段下载任务：探测、分片计划、并发下载、合并与清理
pub mod task {
    use crate::internal;
    pub use internal::getting_task::structs::*;
    pub use internal::getting_task::structs::getting_task::{
        parse_content_disposition_filename, plan_ranges,
    };
}

pub mod progress {
    use crate::internal;
    pub use internal::progress::*;
}

/// SHA512 工具，与合并前的校验使用同一算法
pub mod checksum {
    use crate::internal;
    pub use internal::checksum::{sha512_of_file, sha512_of_files};
}

pub mod client {
    use crate::internal;
    pub use internal::client::build_client;
}
