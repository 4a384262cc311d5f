use std::path::{Path, PathBuf};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::types::download::DEFAULT_FILE_NAME;
use crate::types::{DownloadStartResponse, DownloadStartResponseAction};
use crate::utils::PathUtils;

/// 原生端对一次下载的最终处理
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadDisposition {
    Cancel,
    Allow(PathBuf),
}

impl DownloadDisposition {
    /// 根据 Dart 应答确定保存位置
    ///
    /// 优先使用应答中的 destinationPath（支持 ~），否则保存到默认下载目录，
    /// 文件名取建议文件名。无法确定目录时取消下载。
    pub fn resolve(
        response: &DownloadStartResponse,
        suggested_filename: Option<&str>,
        config: &BridgeConfig,
    ) -> Self {
        if response.action != DownloadStartResponseAction::Allow {
            return Self::Cancel;
        }

        match Self::destination(response, suggested_filename, config) {
            Ok(path) => Self::Allow(path),
            Err(e) => {
                log::warn!("无法确定下载保存路径，取消下载: {}", e);
                Self::Cancel
            }
        }
    }

    fn destination(
        response: &DownloadStartResponse,
        suggested_filename: Option<&str>,
        config: &BridgeConfig,
    ) -> Result<PathBuf, BridgeError> {
        if let Some(path) = response.destination_path.as_deref() {
            return Self::explicit_destination(path);
        }

        let file_name = suggested_filename
            .and_then(PathUtils::sanitize_file_name)
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        Ok(config.default_download_dir()?.join(file_name))
    }

    /// Dart 指定的路径必须是绝对的文件路径
    fn explicit_destination(raw: &str) -> Result<PathBuf, BridgeError> {
        let invalid = || BridgeError::InvalidDestination(raw.to_string());
        if raw == "~" || raw.ends_with('/') || raw.ends_with('\\') {
            return Err(invalid());
        }

        let path = PathUtils::expand_home_dir(raw)?;
        if !path.is_absolute() || path.file_name().is_none() {
            return Err(invalid());
        }
        Ok(path)
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Allow(path) => Some(path),
            Self::Cancel => None,
        }
    }
}
