use async_trait::async_trait;
use bytes::Bytes;

use crate::codec::{CodecError, MethodCall};
use crate::value::FlValue;

/// 方法通道错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("Method error {code}: {}", .message.as_deref().unwrap_or(""))]
    MethodError {
        code: String,
        message: Option<String>,
        details: FlValue,
    },

    #[error("Method not implemented")]
    NotImplemented,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ChannelError {
    pub fn method_error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ChannelError::MethodError {
            code: code.into(),
            message: Some(message.into()),
            details: FlValue::Null,
        }
    }
}

/// 二进制消息通道（引擎提供的 platform message 接口）
/// 空应答表示对端没有注册处理器
#[async_trait]
pub trait BinaryMessenger: Send + Sync {
    async fn send(&self, channel: &str, message: Bytes) -> Result<Vec<u8>, ChannelError>;
}

/// 以变体值为参数和返回值的方法通道
#[async_trait]
pub trait MethodChannel: Send + Sync {
    async fn invoke_method(&self, method: &str, arguments: FlValue)
        -> Result<FlValue, ChannelError>;
}

/// Dart 端发起的方法调用的处理器
#[async_trait]
pub trait MethodCallHandler: Send + Sync {
    async fn handle(&self, call: MethodCall) -> Result<FlValue, ChannelError>;
}
