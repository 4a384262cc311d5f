/// 离开作用域时执行一次清理闭包
///
/// 典型用法是在等待 Dart 应答期间持有原生句柄：任何提前返回（包括 future
/// 被丢弃）都会触发清理；句柄所有权转移后调用 [`ScopeGuard::dismiss`] 解除。
///
/// 移动守卫时激活状态随之转移，被移走的一方不会再执行闭包。
///
/// 只提供无参闭包加 `dismiss` 的形式；需要守卫持有并交还值时（`scopeguard::guard` /
/// `into_inner` 那种用法），调用方把值放进等待表之类的容器，由闭包去取。
#[must_use = "the guard fires immediately if it is not bound to a variable"]
pub struct ScopeGuard<F: FnOnce()> {
    callback: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    pub fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// 解除守卫，闭包不会被执行
    pub fn dismiss(&mut self) {
        self.callback = None;
    }

    pub fn is_active(&self) -> bool {
        self.callback.is_some()
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

pub fn make_scope_guard<F: FnOnce()>(callback: F) -> ScopeGuard<F> {
    ScopeGuard::new(callback)
}

/// 在当前作用域结束时执行给定语句
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::utils::scope_guard::make_scope_guard(|| { $($body)* });
    };
}
