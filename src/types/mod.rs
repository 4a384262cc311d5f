// 原生 WebView 与 Dart 之间传递的请求 / 应答数据结构

pub mod credential;
pub mod download;
pub mod file_chooser;
pub mod http_auth;
pub mod protection_space;
pub mod server_trust;
pub mod windows;

pub use credential::URLCredential;
pub use download::*;
pub use file_chooser::*;
pub use http_auth::*;
pub use protection_space::URLProtectionSpace;
pub use server_trust::*;
pub use windows::{FaviconImageFormat, NotificationDirection};

use crate::value::FlValue;

/// 统一的变体编解码接口
///
/// 解码不会失败：缺失、为 null 或类型不符的输入一律退回到最保守的默认值
/// （取消 / 拒绝 / 空），不会得到未经确认的"允许"。
pub trait FlValueCodec: Sized {
    fn to_fl_value(&self) -> FlValue;

    fn from_fl_value(value: Option<&FlValue>) -> Self;
}

/// 只有 map 才会被解码，其余情况交给调用方使用默认值
pub(crate) fn as_map(value: Option<&FlValue>) -> Option<&FlValue> {
    value.filter(|v| v.is_map())
}
