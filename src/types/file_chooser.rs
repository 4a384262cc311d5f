use super::{as_map, FlValueCodec};
use crate::value::{
    get_fl_map_value, get_optional_fl_map_value, make_fl_value, to_fl_map, FlValue,
};

/// 文件选择器模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileChooserMode {
    #[default]
    Open = 0,
    OpenMultiple = 1,
    OpenFolder = 2,
    Save = 3,
}

impl FileChooserMode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::OpenMultiple),
            2 => Some(Self::OpenFolder),
            3 => Some(Self::Save),
            _ => None,
        }
    }
}

/// 网页请求打开文件选择器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowFileChooserRequest {
    pub mode: FileChooserMode,
    pub accept_types: Vec<String>,
    pub is_capture_enabled: bool,
    pub title: Option<String>,
    pub filename_hint: Option<String>,
}

impl FlValueCodec for ShowFileChooserRequest {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("mode", make_fl_value(self.mode as i64)),
            ("acceptTypes", make_fl_value(self.accept_types.clone())),
            ("isCaptureEnabled", make_fl_value(self.is_capture_enabled)),
            ("title", make_fl_value(self.title.clone())),
            ("filenameHint", make_fl_value(self.filename_hint.clone())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            mode: get_optional_fl_map_value(map, "mode")
                .and_then(FileChooserMode::from_code)
                .unwrap_or_default(),
            accept_types: get_fl_map_value(map, "acceptTypes", Vec::new()),
            is_capture_enabled: get_fl_map_value(map, "isCaptureEnabled", false),
            title: get_optional_fl_map_value(map, "title"),
            filename_hint: get_optional_fl_map_value(map, "filenameHint"),
        }
    }
}

/// Dart 端对文件选择请求的应答
/// 默认未处理，由原生选择器接管
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowFileChooserResponse {
    pub handled_by_client: bool,
    pub file_paths: Option<Vec<String>>,
}

impl ShowFileChooserResponse {
    /// 客户端已处理且给出了路径（可以为空列表，表示取消选择）
    pub fn selected_paths(&self) -> Option<&[String]> {
        if self.handled_by_client {
            self.file_paths.as_deref()
        } else {
            None
        }
    }
}

impl FlValueCodec for ShowFileChooserResponse {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("handledByClient", make_fl_value(self.handled_by_client)),
            ("filePaths", make_fl_value(self.file_paths.clone())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            handled_by_client: get_fl_map_value(map, "handledByClient", false),
            file_paths: get_optional_fl_map_value(map, "filePaths"),
        }
    }
}
