use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::BridgeError;

/// 每个 WebView 实例的方法通道名前缀，后接实例 id
pub const DEFAULT_CHANNEL_PREFIX: &str = "com.pichillilorenzo/flutter_inappwebview_";

/// 桥接层配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    pub channel_prefix: String,
    /// 允许下载但未指定保存路径时使用的目录，缺省为系统下载目录
    pub download_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_prefix: DEFAULT_CHANNEL_PREFIX.to_string(),
            download_dir: None,
        }
    }
}

impl BridgeConfig {
    /// 从 JSON 读取配置，缺失字段使用默认值
    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        let config: Self = serde_json::from_str(json)?;
        if config.channel_prefix.is_empty() {
            return Err(BridgeError::InvalidConfig(
                "channelPrefix must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn channel_name(&self, view_id: impl std::fmt::Display) -> String {
        format!("{}{}", self.channel_prefix, view_id)
    }

    /// 默认下载目录：配置 > 系统下载目录 > ~/Downloads
    pub fn default_download_dir(&self) -> Result<PathBuf, BridgeError> {
        if let Some(dir) = &self.download_dir {
            return Ok(dir.clone());
        }
        if let Some(dir) = dirs::download_dir() {
            return Ok(dir);
        }
        dirs::home_dir()
            .map(|home| home.join("Downloads"))
            .ok_or(BridgeError::DownloadDirUnavailable)
    }
}
