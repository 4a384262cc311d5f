use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 等待 Dart 应答期间暂存的原生句柄
/// 每个句柄只能被取出一次
pub struct PendingRequests<H> {
    next_id: AtomicI64,
    entries: Mutex<HashMap<i64, H>>,
}

impl<H> PendingRequests<H> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, H>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, handle: H) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, handle);
        id
    }

    pub fn take(&self, id: i64) -> Option<H> {
        self.lock().remove(&id)
    }

    /// 取出全部句柄，用于 WebView 销毁时统一取消
    pub fn drain(&self) -> Vec<H> {
        self.lock().drain().map(|(_, handle)| handle).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H> Default for PendingRequests<H> {
    fn default() -> Self {
        Self::new()
    }
}
