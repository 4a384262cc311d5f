// 下载决策与原生下载句柄管理
// Dart 端决定允许 / 取消，原生端据此设置保存路径或取消下载

pub mod disposition;
pub mod manager;

pub use disposition::DownloadDisposition;
pub use manager::{DownloadHandle, DownloadManager};
