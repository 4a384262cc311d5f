use std::fmt;

use super::{as_map, FlValueCodec, URLProtectionSpace};
use crate::value::{
    get_fl_map_value_raw, get_optional_fl_map_value, make_fl_value, to_fl_map, FlValue,
};

/// TLS 证书校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// GTlsCertificateFlags 各位的含义，按优先级排列
const TLS_FLAG_MESSAGES: [(u32, &str); 7] = [
    (1 << 0, "The signing certificate authority is not known"),
    (1 << 1, "The certificate does not match the expected identity of the site"),
    (1 << 2, "The certificate's activation time is still in the future"),
    (1 << 3, "The certificate has expired"),
    (1 << 4, "The certificate has been revoked"),
    (1 << 5, "The certificate's algorithm is considered insecure"),
    (1 << 6, "Some other error occurred validating the certificate"),
];

impl SslError {
    /// 由 TLS 校验标志位生成错误描述，取第一个置位的标志
    /// 没有任何标志位时返回 None
    pub fn from_tls_flags(flags: u32) -> Option<Self> {
        TLS_FLAG_MESSAGES
            .iter()
            .find(|(bit, _)| flags & bit != 0)
            .map(|(bit, message)| Self {
                code: Some(i64::from(*bit)),
                message: Some(message.to_string()),
            })
    }
}

impl FlValueCodec for SslError {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("code", make_fl_value(self.code)),
            ("message", make_fl_value(self.message.clone())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            code: get_optional_fl_map_value(map, "code"),
            message: get_optional_fl_map_value(map, "message"),
        }
    }
}

/// 证书校验失败时发给 Dart 的质询
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerTrustChallenge {
    pub protection_space: URLProtectionSpace,
    pub ssl_error: Option<SslError>,
    /// DER 编码的服务端证书
    pub certificate_der: Option<Vec<u8>>,
}

impl FlValueCodec for ServerTrustChallenge {
    fn to_fl_value(&self) -> FlValue {
        let mut protection_space = self.protection_space.to_fl_value();
        protection_space.set_string(
            "sslError",
            self.ssl_error
                .as_ref()
                .map(SslError::to_fl_value)
                .unwrap_or_default(),
        );
        protection_space.set_string(
            "sslCertificate",
            match &self.certificate_der {
                Some(der) => to_fl_map([("x509Certificate", make_fl_value(der.clone()))]),
                None => FlValue::Null,
            },
        );

        to_fl_map([("protectionSpace", protection_space)])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(space) = as_map(value).and_then(|map| get_fl_map_value_raw(map, "protectionSpace"))
        else {
            return Self::default();
        };

        Self {
            protection_space: URLProtectionSpace::from_fl_value(Some(space)),
            ssl_error: get_fl_map_value_raw(space, "sslError")
                .filter(|v| v.is_map())
                .map(|v| SslError::from_fl_value(Some(v))),
            certificate_der: get_fl_map_value_raw(space, "sslCertificate")
                .and_then(|cert| get_optional_fl_map_value(cert, "x509Certificate")),
        }
    }
}

/// 证书质询的处理动作，数值是与 Dart 端约定的协议
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerTrustAuthResponseAction {
    #[default]
    Cancel = 0,
    Proceed = 1,
}

impl ServerTrustAuthResponseAction {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Cancel),
            1 => Some(Self::Proceed),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

impl fmt::Display for ServerTrustAuthResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancel => write!(f, "CANCEL"),
            Self::Proceed => write!(f, "PROCEED"),
        }
    }
}

/// Dart 端对证书质询的决定
/// 只有明确的 `action: 1` 才会继续，其余一律取消
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerTrustAuthResponse {
    pub action: ServerTrustAuthResponseAction,
}

impl ServerTrustAuthResponse {
    pub fn proceeds(&self) -> bool {
        self.action == ServerTrustAuthResponseAction::Proceed
    }
}

impl FlValueCodec for ServerTrustAuthResponse {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([("action", make_fl_value(self.action.code()))])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let action = as_map(value)
            .and_then(|map| get_optional_fl_map_value(map, "action"))
            .and_then(ServerTrustAuthResponseAction::from_code)
            .unwrap_or_default();

        Self { action }
    }
}
