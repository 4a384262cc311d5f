use super::{as_map, FlValueCodec, URLCredential, URLProtectionSpace};
use crate::value::{
    get_fl_map_value, get_fl_map_value_raw, get_optional_fl_map_value, make_fl_value, to_fl_map,
    FlValue,
};

/// HTTP 认证质询（Basic / Digest / NTLM 等）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpAuthenticationChallenge {
    pub protection_space: URLProtectionSpace,
    pub previous_failure_count: i64,
    pub proposed_credential: Option<URLCredential>,
}

impl HttpAuthenticationChallenge {
    pub fn new(protection_space: URLProtectionSpace, is_retry: bool) -> Self {
        Self {
            protection_space,
            previous_failure_count: i64::from(is_retry),
            proposed_credential: None,
        }
    }
}

impl FlValueCodec for HttpAuthenticationChallenge {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("protectionSpace", self.protection_space.to_fl_value()),
            ("previousFailureCount", make_fl_value(self.previous_failure_count)),
            (
                "proposedCredential",
                self.proposed_credential
                    .as_ref()
                    .map(URLCredential::to_fl_value)
                    .unwrap_or_default(),
            ),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            protection_space: URLProtectionSpace::from_fl_value(get_fl_map_value_raw(
                map,
                "protectionSpace",
            )),
            previous_failure_count: get_fl_map_value(map, "previousFailureCount", 0),
            proposed_credential: get_fl_map_value_raw(map, "proposedCredential")
                .filter(|v| v.is_map())
                .map(|v| URLCredential::from_fl_value(Some(v))),
        }
    }
}

/// HTTP 认证的处理动作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpAuthResponseAction {
    #[default]
    Cancel = 0,
    Proceed = 1,
    UseSavedHttpAuthCredentials = 2,
}

impl HttpAuthResponseAction {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Cancel),
            1 => Some(Self::Proceed),
            2 => Some(Self::UseSavedHttpAuthCredentials),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Dart 端对 HTTP 认证质询的应答
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpAuthResponse {
    pub username: Option<String>,
    pub password: Option<String>,
    pub permanent_persistence: bool,
    pub action: HttpAuthResponseAction,
}

impl HttpAuthResponse {
    /// 仅当动作为继续且用户名密码齐全时返回凭据
    pub fn credential(&self) -> Option<URLCredential> {
        if self.action != HttpAuthResponseAction::Proceed {
            return None;
        }

        let credential = URLCredential {
            username: self.username.clone(),
            password: self.password.clone(),
        };
        credential.is_complete().then_some(credential)
    }
}

impl FlValueCodec for HttpAuthResponse {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("username", make_fl_value(self.username.clone())),
            ("password", make_fl_value(self.password.clone())),
            ("permanentPersistence", make_fl_value(self.permanent_persistence)),
            ("action", make_fl_value(self.action.code())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            username: get_optional_fl_map_value(map, "username"),
            password: get_optional_fl_map_value(map, "password"),
            permanent_persistence: get_fl_map_value(map, "permanentPersistence", false),
            action: get_optional_fl_map_value(map, "action")
                .and_then(HttpAuthResponseAction::from_code)
                .unwrap_or_default(),
        }
    }
}
