//! 进度汇报器：多分片共享的原子计数器，按阶段向监听者派发事件。
//!
//! 计数只用 `fetch_add` 累加，不加锁；派发时在互斥区内重新读取计数，
//! 保证监听者看到的 `progress` 在同一阶段内不递减。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::structs::progress_event::{ProgressEvent, ProgressListener, ProgressPhase};

#[derive(Debug)]
pub(crate) struct ProgressReporter {
    phase: ProgressPhase,
    total: u64,
    progress: AtomicU64,
    listener: Arc<Mutex<ProgressListener>>,
}

impl ProgressReporter {
    /// 进入下载阶段；未配置监听时返回 `None`，后续所有汇报都是空操作。
    pub(crate) fn downloading(
        total: u64,
        listener: Option<&ProgressListener>,
    ) -> Option<Arc<Self>> {
        listener.map(|l| {
            Arc::new(Self {
                phase: ProgressPhase::Downloading,
                total,
                progress: AtomicU64::new(0),
                listener: Arc::new(Mutex::new(l.clone())),
            })
        })
    }

    /// 切换到合并阶段，计数归零。
    pub(crate) fn to_coping(&self) -> Arc<Self> {
        Arc::new(Self {
            phase: ProgressPhase::Coping,
            total: self.total,
            progress: AtomicU64::new(0),
            listener: Arc::clone(&self.listener),
        })
    }

    pub(crate) fn add(&self, n: u64) {
        if n == 0 {
            return;
        }
        self.progress.fetch_add(n, Ordering::SeqCst);
        let listener = self.listener.lock().unwrap_or_else(|e| e.into_inner());
        listener.emit(ProgressEvent {
            phase: self.phase,
            progress: self.progress.load(Ordering::SeqCst),
            total: self.total,
        });
    }

    /// 最后一个事件：`Done`，且 `progress == total`。
    pub(crate) fn fire_done(&self) {
        let listener = self.listener.lock().unwrap_or_else(|e| e.into_inner());
        listener.emit(ProgressEvent {
            phase: ProgressPhase::Done,
            progress: self.total,
            total: self.total,
        });
    }
}

/// 对可选汇报器累加字节数。
pub(crate) fn report(reporter: Option<&Arc<ProgressReporter>>, n: u64) {
    if let Some(r) = reporter {
        r.add(n);
    }
}
