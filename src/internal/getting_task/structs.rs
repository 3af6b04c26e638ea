pub mod download_error;
pub mod getting_config;
pub mod getting_task;
pub mod parts_cleaner;
pub mod remote_file;
pub mod remote_resource;
pub mod segment_spec;

// 重导出公共类型
pub use download_error::{DownloadError, ErrorKind};
pub use getting_config::GettingConfig;
pub use getting_task::GettingTask;
pub use parts_cleaner::{GetFailure, PartsCleaner};
pub use remote_file::{DEFAULT_MAX_IDLE_CONNS_PER_HOST, DEFAULT_TIMEOUT, RemoteFile};
pub use remote_resource::RemoteResource;
pub use segment_spec::{DownloadPlan, SegmentSpec};
