// WebView2 专用的整数枚举
// Dart 端传整数，原生端映射为 COREWEBVIEW2_* 常量

/// 网站图标格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaviconImageFormat {
    #[default]
    Png = 0,
    Jpeg = 1,
}

impl FaviconImageFormat {
    /// 缺失或未知的值按 PNG 处理
    pub fn from_i64(value: Option<i64>) -> Self {
        match value {
            Some(1) => Self::Jpeg,
            _ => Self::Png,
        }
    }

    /// COREWEBVIEW2_FAVICON_IMAGE_FORMAT
    pub fn native_value(&self) -> i32 {
        match self {
            Self::Png => 0,
            Self::Jpeg => 1,
        }
    }
}

/// 网页通知的文字方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationDirection {
    #[default]
    Default = 0,
    Ltr = 1,
    Rtl = 2,
}

impl NotificationDirection {
    pub fn from_i64(value: Option<i64>) -> Self {
        match value {
            Some(1) => Self::Ltr,
            Some(2) => Self::Rtl,
            _ => Self::Default,
        }
    }

    /// COREWEBVIEW2_TEXT_DIRECTION_KIND
    pub fn native_value(&self) -> i32 {
        match self {
            Self::Default => 0,
            Self::Ltr => 1,
            Self::Rtl => 2,
        }
    }

    pub fn from_native(value: i32) -> Self {
        Self::from_i64(Some(i64::from(value)))
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}
