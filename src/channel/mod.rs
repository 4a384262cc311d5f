// 方法通道与 WebView 回调委托
// 原生回调 -> 请求 DTO -> 方法通道 -> Dart -> 应答 DTO

pub mod codec_channel;
pub mod delegate;
pub mod pending;
pub mod traits;

pub use codec_channel::CodecMethodChannel;
pub use delegate::WebViewChannelDelegate;
pub use pending::PendingRequests;
pub use traits::*;
