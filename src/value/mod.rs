// 平台通道变体值及其转换
// FlValue 是原生侧与 Dart 侧之间传递的动态类型容器

pub mod convert;
pub mod json;
pub mod types;

pub use convert::*;
pub use types::*;
