// InAppWebView 原生插件与 Dart 之间的数据编组层
// 平台通道变体值、回调 DTO、标准编码、方法通道委托与下载决策

pub mod channel; // 方法通道与 WebView 回调委托
pub mod codec; // 标准消息 / 方法编码
pub mod config;
pub mod download; // 下载决策与原生句柄管理
pub mod error;
pub mod types; // 请求 / 应答 DTO
pub mod utils; // 通用工具模块
pub mod value; // FlValue 及其转换

pub use channel::{
    BinaryMessenger, ChannelError, CodecMethodChannel, MethodCallHandler, MethodChannel,
    WebViewChannelDelegate,
};
pub use codec::{CodecError, MethodCall, MethodResponse, StandardMessageCodec, StandardMethodCodec};
pub use config::BridgeConfig;
pub use download::{DownloadDisposition, DownloadHandle, DownloadManager};
pub use error::BridgeError;
pub use types::FlValueCodec;
pub use utils::{make_scope_guard, ScopeGuard};
pub use value::{FlValue, FlValueType};
