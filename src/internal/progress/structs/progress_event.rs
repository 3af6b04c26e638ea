use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// 进度阶段，按声明顺序严格前进。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgressPhase {
    /// 分片下载中
    Downloading,
    /// 从分片临时文件合并到目标文件
    Coping,
    /// 全部完成
    Done,
}

/// 进度事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    /// 当前阶段已处理的字节数
    pub progress: u64,
    /// 文件总大小（字节）
    pub total: u64,
}

impl ProgressEvent {
    /// 进度百分比（0～100）；总大小为 0 时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        (self.progress as f64 / self.total as f64) * 100.0
    }
}

/// 进度监听回调。
///
/// 回调在下载任务内同步执行，且同一时刻只会有一个回调在运行；
/// 回调应尽快返回，长时间阻塞会拖慢所有分片。需要异步消费时用 [`ProgressListener::channel`]。
#[derive(Clone)]
pub struct ProgressListener(Arc<dyn Fn(ProgressEvent) + Send + Sync>);

impl ProgressListener {
    pub fn new(f: impl Fn(ProgressEvent) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// 以无界队列的形式接收进度事件；接收端被丢弃后事件静默丢弃。
    pub fn channel() -> (Self, UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = unbounded_channel();
        let listener = Self::new(move |event| {
            let _ = tx.send(event);
        });
        (listener, rx)
    }

    pub(crate) fn emit(&self, event: ProgressEvent) {
        (self.0)(event)
    }
}

/// 回调本身无法打印
impl fmt::Debug for ProgressListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProgressListener").field(&"<callback>").finish()
    }
}
