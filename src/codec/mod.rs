// 平台通道的二进制编码
// 标准消息编码（值）与标准方法编码（方法调用 / 应答信封）

pub mod message;
pub mod method;

pub use message::StandardMessageCodec;
pub use method::{MethodCall, MethodResponse, StandardMethodCodec};

/// 编解码错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("Message truncated: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("Unknown type tag {tag} at offset {offset}")]
    UnknownType { tag: u8, offset: usize },

    #[error("Invalid UTF-8 string at offset {0}")]
    InvalidUtf8(usize),

    #[error("Trailing data: {0} bytes left after value")]
    TrailingData(usize),

    #[error("Nesting exceeds {0} levels")]
    TooDeep(usize),

    #[error("Invalid method call: {0}")]
    InvalidMethodCall(String),

    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Value too large to encode: {0} elements")]
    TooLarge(usize),
}
