/// 桥接层错误类型
/// DTO 解码本身不会失败，这里只覆盖配置、路径解析与下载目录准备
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot determine home directory")]
    HomeDirUnavailable,

    #[error("Cannot determine download directory")]
    DownloadDirUnavailable,

    #[error("Invalid download destination: {0}")]
    InvalidDestination(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::InvalidConfig(e.to_string())
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(e: std::io::Error) -> Self {
        BridgeError::IoError(e.to_string())
    }
}
