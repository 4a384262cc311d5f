use std::fmt;

use url::Url;

use super::{as_map, FlValueCodec};
use crate::value::{get_optional_fl_map_value, make_fl_value, to_fl_map, FlValue};

pub(crate) const DEFAULT_FILE_NAME: &str = "downloadfile.bin";

/// 原生下载对象的只读视图
/// 由 WebKitDownload / WebView2 DownloadOperation 的封装实现
pub trait NativeDownload {
    fn uri(&self) -> Option<String>;

    fn suggested_filename(&self) -> Option<String>;

    fn mime_type(&self) -> Option<String>;

    /// 未知长度时原生接口通常返回 0
    fn content_length(&self) -> Option<u64>;

    fn response_header(&self, name: &str) -> Option<String>;

    fn user_agent(&self) -> Option<String>;

    fn text_encoding(&self) -> Option<String> {
        None
    }
}

/// 下载开始时发送给 Dart 的请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStartRequest {
    pub url: Option<String>,
    pub suggested_filename: Option<String>,
    pub mime_type: Option<String>,
    pub content_length: Option<i64>,
    pub content_disposition: Option<String>,
    pub user_agent: Option<String>,
    pub text_encoding_name: Option<String>,
}

impl DownloadStartRequest {
    pub fn from_native(download: &(impl NativeDownload + ?Sized)) -> Self {
        let url = download.uri().filter(|u| !u.is_empty());
        let content_disposition = download.response_header("Content-Disposition");
        let mime_type = download.mime_type().filter(|m| !m.is_empty());

        // 原生没有给出文件名时，按 Content-Disposition / URL 推测
        let suggested_filename = download
            .suggested_filename()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                url.as_deref()
                    .map(|u| guess_file_name(u, content_disposition.as_deref()))
            });

        Self {
            url,
            suggested_filename,
            mime_type,
            content_length: download
                .content_length()
                .filter(|len| *len > 0)
                .and_then(|len| i64::try_from(len).ok()),
            content_disposition,
            user_agent: download.user_agent(),
            text_encoding_name: download.text_encoding(),
        }
    }
}

impl FlValueCodec for DownloadStartRequest {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("url", make_fl_value(self.url.clone())),
            ("suggestedFilename", make_fl_value(self.suggested_filename.clone())),
            ("mimeType", make_fl_value(self.mime_type.clone())),
            ("contentLength", make_fl_value(self.content_length)),
            ("contentDisposition", make_fl_value(self.content_disposition.clone())),
            ("userAgent", make_fl_value(self.user_agent.clone())),
            ("textEncodingName", make_fl_value(self.text_encoding_name.clone())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            url: get_optional_fl_map_value(map, "url"),
            suggested_filename: get_optional_fl_map_value(map, "suggestedFilename"),
            mime_type: get_optional_fl_map_value(map, "mimeType"),
            content_length: get_optional_fl_map_value(map, "contentLength"),
            content_disposition: get_optional_fl_map_value(map, "contentDisposition"),
            user_agent: get_optional_fl_map_value(map, "userAgent"),
            text_encoding_name: get_optional_fl_map_value(map, "textEncodingName"),
        }
    }
}

/// 下载处理动作，数值是与 Dart 端约定的协议
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DownloadStartResponseAction {
    #[default]
    Cancel = 0,
    Allow = 1,
}

impl DownloadStartResponseAction {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Cancel),
            1 => Some(Self::Allow),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

impl fmt::Display for DownloadStartResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancel => write!(f, "CANCEL"),
            Self::Allow => write!(f, "ALLOW"),
        }
    }
}

/// Dart 端对下载请求的决定
/// 空 map、未知动作码或非 map 输入都按取消处理
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStartResponse {
    pub action: DownloadStartResponseAction,
    pub destination_path: Option<String>,
}

impl DownloadStartResponse {
    pub fn allow(destination_path: Option<String>) -> Self {
        Self {
            action: DownloadStartResponseAction::Allow,
            destination_path,
        }
    }
}

impl FlValueCodec for DownloadStartResponse {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("action", make_fl_value(self.action.code())),
            ("destinationPath", make_fl_value(self.destination_path.clone())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        let action = get_optional_fl_map_value(map, "action")
            .and_then(DownloadStartResponseAction::from_code)
            .unwrap_or_default();

        Self {
            action,
            destination_path: get_optional_fl_map_value::<String>(map, "destinationPath")
                .filter(|p| !p.is_empty()),
        }
    }
}

/// 推测下载文件名
/// 优先使用 Content-Disposition 中的 filename，其次是 URL 最后一段路径
pub fn guess_file_name(url: &str, content_disposition: Option<&str>) -> String {
    if let Some(name) = content_disposition.and_then(filename_from_disposition) {
        return name;
    }

    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            urlencoding::decode(&segment)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| segment.clone())
        })
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

fn filename_from_disposition(disposition: &str) -> Option<String> {
    disposition.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = value.trim().trim_matches('"');
        // 去掉路径部分，只保留文件名
        let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::to_fl_map;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeDownload {
        uri: Option<String>,
        filename: Option<String>,
        mime: Option<String>,
        length: Option<u64>,
        headers: HashMap<String, String>,
    }

    impl NativeDownload for FakeDownload {
        fn uri(&self) -> Option<String> {
            self.uri.clone()
        }

        fn suggested_filename(&self) -> Option<String> {
            self.filename.clone()
        }

        fn mime_type(&self) -> Option<String> {
            self.mime.clone()
        }

        fn content_length(&self) -> Option<u64> {
            self.length
        }

        fn response_header(&self, name: &str) -> Option<String> {
            self.headers.get(name).cloned()
        }

        fn user_agent(&self) -> Option<String> {
            Some("Mozilla/5.0".to_string())
        }
    }

    #[test]
    fn from_native_fills_request() {
        let download = FakeDownload {
            uri: Some("https://example.com/files/report.pdf".into()),
            mime: Some("application/pdf".into()),
            length: Some(1024),
            headers: HashMap::from([(
                "Content-Disposition".to_string(),
                "attachment; filename=\"q3.pdf\"".to_string(),
            )]),
            ..Default::default()
        };

        let request = DownloadStartRequest::from_native(&download);
        assert_eq!(request.url.as_deref(), Some("https://example.com/files/report.pdf"));
        assert_eq!(request.suggested_filename.as_deref(), Some("q3.pdf"));
        assert_eq!(request.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(request.content_length, Some(1024));
        assert_eq!(request.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(request.text_encoding_name, None);
    }

    #[test]
    fn unknown_length_is_absent() {
        let download = FakeDownload {
            uri: Some("https://example.com/a%20b.txt".into()),
            length: Some(0),
            ..Default::default()
        };

        let request = DownloadStartRequest::from_native(&download);
        assert_eq!(request.content_length, None);
        assert_eq!(request.suggested_filename.as_deref(), Some("a b.txt"));
    }

    #[test]
    fn request_serializes_wire_keys() {
        let request = DownloadStartRequest {
            url: Some("https://example.com/f.bin".into()),
            content_length: Some(10),
            ..Default::default()
        };

        let value = request.to_fl_value();
        assert_eq!(
            value.lookup_string("url"),
            Some(&FlValue::String("https://example.com/f.bin".into()))
        );
        assert_eq!(value.lookup_string("contentLength"), Some(&FlValue::Int(10)));
        assert_eq!(value.lookup_string("suggestedFilename"), Some(&FlValue::Null));
        assert_eq!(DownloadStartRequest::from_fl_value(Some(&value)), request);
    }

    #[test]
    fn allow_with_destination() {
        let value = to_fl_map([
            ("action", FlValue::Int(1)),
            ("destinationPath", FlValue::String("/tmp/f.bin".into())),
        ]);

        let response = DownloadStartResponse::from_fl_value(Some(&value));
        assert_eq!(response.action, DownloadStartResponseAction::Allow);
        assert_eq!(response.destination_path.as_deref(), Some("/tmp/f.bin"));
    }

    #[test]
    fn empty_or_malformed_response_cancels() {
        let cancel = DownloadStartResponse::default();
        assert_eq!(cancel.action, DownloadStartResponseAction::Cancel);

        assert_eq!(DownloadStartResponse::from_fl_value(Some(&FlValue::new_map())), cancel);
        assert_eq!(DownloadStartResponse::from_fl_value(None), cancel);
        assert_eq!(DownloadStartResponse::from_fl_value(Some(&FlValue::Int(1))), cancel);
        assert_eq!(
            DownloadStartResponse::from_fl_value(Some(&to_fl_map([("action", FlValue::Int(7))]))),
            cancel
        );
        assert_eq!(
            DownloadStartResponse::from_fl_value(Some(&to_fl_map([(
                "action",
                FlValue::String("1".into())
            )]))),
            cancel
        );
    }

    #[test]
    fn guess_file_name_fallbacks() {
        assert_eq!(
            guess_file_name("https://example.com/dir/", Some("inline; filename=../x.zip")),
            "x.zip"
        );
        assert_eq!(guess_file_name("https://example.com/dir/", None), "downloadfile.bin");
        assert_eq!(guess_file_name("not a url", None), "downloadfile.bin");
    }
}
