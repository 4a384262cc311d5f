use url::Url;

use super::{as_map, FlValueCodec};
use crate::value::{
    get_fl_map_value, get_optional_fl_map_value, make_fl_value, to_fl_map, FlValue,
};

/// 需要认证的服务端描述
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct URLProtectionSpace {
    pub host: String,
    pub port: i64,
    pub protocol: Option<String>,
    pub realm: Option<String>,
    pub authentication_method: Option<String>,
    pub is_proxy: bool,
}

impl URLProtectionSpace {
    /// 从请求 URL 推导 host / port / protocol
    /// 没有显式端口时使用协议的默认端口，未知协议为 0
    pub fn from_url(
        url: &Url,
        realm: Option<String>,
        authentication_method: Option<String>,
        is_proxy: bool,
    ) -> Self {
        Self {
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port_or_known_default().map(i64::from).unwrap_or(0),
            protocol: Some(url.scheme().to_string()),
            realm,
            authentication_method,
            is_proxy,
        }
    }
}

impl FlValueCodec for URLProtectionSpace {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("host", make_fl_value(self.host.clone())),
            ("port", make_fl_value(self.port)),
            ("protocol", make_fl_value(self.protocol.clone())),
            ("realm", make_fl_value(self.realm.clone())),
            (
                "authenticationMethod",
                make_fl_value(self.authentication_method.clone()),
            ),
            ("isProxy", make_fl_value(self.is_proxy)),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            host: get_fl_map_value(map, "host", String::new()),
            port: get_fl_map_value(map, "port", 0),
            protocol: get_optional_fl_map_value(map, "protocol"),
            realm: get_optional_fl_map_value(map, "realm"),
            authentication_method: get_optional_fl_map_value(map, "authenticationMethod"),
            is_proxy: get_fl_map_value(map, "isProxy", false),
        }
    }
}
