use super::{as_map, FlValueCodec};
use crate::value::{get_optional_fl_map_value, make_fl_value, to_fl_map, FlValue};

/// 用户名 / 密码凭据，两者都可缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct URLCredential {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl URLCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// 用户名和密码都存在时才能用于认证
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl FlValueCodec for URLCredential {
    fn to_fl_value(&self) -> FlValue {
        to_fl_map([
            ("username", make_fl_value(self.username.clone())),
            ("password", make_fl_value(self.password.clone())),
        ])
    }

    fn from_fl_value(value: Option<&FlValue>) -> Self {
        let Some(map) = as_map(value) else {
            return Self::default();
        };

        Self {
            username: get_optional_fl_map_value(map, "username"),
            password: get_optional_fl_map_value(map, "password"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::option;
    use proptest::prelude::*;

    #[test]
    fn missing_fields_stay_missing() {
        let credential = URLCredential {
            username: Some("alice".into()),
            password: None,
        };

        let value = credential.to_fl_value();
        assert_eq!(value.lookup_string("password"), Some(&FlValue::Null));
        assert_eq!(URLCredential::from_fl_value(Some(&value)), credential);
        assert!(!credential.is_complete());
    }

    #[test]
    fn non_map_input_is_empty() {
        assert_eq!(URLCredential::from_fl_value(None), URLCredential::default());
        assert_eq!(
            URLCredential::from_fl_value(Some(&FlValue::String("alice".into()))),
            URLCredential::default()
        );
    }

    #[test]
    fn test_roundtrip_credential() {
        proptest!(|(username in option::of(".*"), password in option::of(".*"))| {
            let credential = URLCredential { username, password };
            let decoded = URLCredential::from_fl_value(Some(&credential.to_fl_value()));
            prop_assert_eq!(decoded, credential);
        })
    }
}
