use std::path::Path;
use std::sync::Arc;

use super::disposition::DownloadDisposition;
use crate::channel::{PendingRequests, WebViewChannelDelegate};
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::types::{DownloadStartRequest, NativeDownload};
use crate::utils::make_scope_guard;

/// 可控制的原生下载对象
pub trait DownloadHandle: NativeDownload + Send {
    /// 设置保存路径并继续下载
    fn allow(&mut self, destination: &Path);

    fn cancel(&mut self);
}

type PendingDownloads = PendingRequests<Box<dyn DownloadHandle>>;

/// 下载管理器
/// 负责在等待 Dart 决定期间持有原生下载，并保证每个下载最终被允许或取消
pub struct DownloadManager {
    config: BridgeConfig,
    pending: Arc<PendingDownloads>,
}

impl DownloadManager {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            pending: Arc::new(PendingRequests::new()),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// 处理一次下载开始事件
    ///
    /// 原生下载在拿到最终决定前一直留在等待表中，期间 future 被丢弃会取消下载。
    pub async fn handle_download_starting(
        &self,
        delegate: &WebViewChannelDelegate,
        download: Box<dyn DownloadHandle>,
    ) -> DownloadDisposition {
        let request = DownloadStartRequest::from_native(download.as_ref());
        let id = self.pending.insert(download);

        let pending = Arc::clone(&self.pending);
        let mut guard = make_scope_guard(move || {
            if let Some(mut handle) = pending.take(id) {
                log::debug!("下载 #{} 的等待被中断，取消下载", id);
                handle.cancel();
            }
        });

        let response = delegate.on_download_starting(&request).await;
        let mut disposition = DownloadDisposition::resolve(
            &response,
            request.suggested_filename.as_deref(),
            &self.config,
        );

        let prepared = match disposition.path() {
            Some(path) => prepare_destination(path).await,
            None => Ok(()),
        };
        if let Err(e) = prepared {
            log::warn!("无法准备下载目录，取消下载: {}", e);
            disposition = DownloadDisposition::Cancel;
        }

        guard.dismiss();
        let Some(mut handle) = self.pending.take(id) else {
            // 等待期间已被 cancel_all 取消
            log::debug!("下载 #{} 已被取消", id);
            return DownloadDisposition::Cancel;
        };

        match disposition.path() {
            Some(path) => {
                log::debug!("下载保存到: {}", path.display());
                handle.allow(path);
            }
            None => {
                log::debug!("下载被拒绝: {:?}", request.url);
                handle.cancel();
            }
        }
        disposition
    }

    /// 取消所有等待 Dart 决定的下载，返回取消的数量
    pub fn cancel_all(&self) -> usize {
        let handles = self.pending.drain();
        let count = handles.len();
        for mut handle in handles {
            handle.cancel();
        }
        if count > 0 {
            log::debug!("已取消 {} 个等待中的下载", count);
        }
        count
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// 创建保存路径的父目录
async fn prepare_destination(path: &Path) -> Result<(), BridgeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

impl Drop for DownloadManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
