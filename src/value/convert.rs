use std::collections::HashMap;

use super::types::{FlValue, FlValueType};

/// 严格查找失败的原因
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Value is not a map")]
    NotAMap,

    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Type mismatch for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: FlValueType,
        found: FlValueType,
    },
}

/// 从变体中提取原生类型
pub trait FromFlValue: Sized {
    /// 期望的变体类型，仅用于错误信息
    const EXPECTED: FlValueType;

    fn extract(value: &FlValue) -> Option<Self>;
}

impl FromFlValue for FlValue {
    const EXPECTED: FlValueType = FlValueType::Null;

    fn extract(value: &FlValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromFlValue for bool {
    const EXPECTED: FlValueType = FlValueType::Bool;

    fn extract(value: &FlValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFlValue for i64 {
    const EXPECTED: FlValueType = FlValueType::Int;

    fn extract(value: &FlValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromFlValue for i32 {
    const EXPECTED: FlValueType = FlValueType::Int;

    fn extract(value: &FlValue) -> Option<Self> {
        value.as_i64().and_then(|i| i32::try_from(i).ok())
    }
}

impl FromFlValue for u64 {
    const EXPECTED: FlValueType = FlValueType::Int;

    fn extract(value: &FlValue) -> Option<Self> {
        value.as_i64().and_then(|i| u64::try_from(i).ok())
    }
}

impl FromFlValue for f64 {
    const EXPECTED: FlValueType = FlValueType::Float;

    fn extract(value: &FlValue) -> Option<Self> {
        match value {
            FlValue::Float(f) => Some(*f),
            // Dart 端可能把 1.0 编码成 1
            FlValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromFlValue for String {
    const EXPECTED: FlValueType = FlValueType::String;

    fn extract(value: &FlValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromFlValue for Vec<String> {
    const EXPECTED: FlValueType = FlValueType::List;

    fn extract(value: &FlValue) -> Option<Self> {
        match value {
            FlValue::List(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }
}

impl FromFlValue for Vec<u8> {
    const EXPECTED: FlValueType = FlValueType::Uint8List;

    fn extract(value: &FlValue) -> Option<Self> {
        match value {
            FlValue::Uint8List(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }
}

impl FromFlValue for Vec<i64> {
    const EXPECTED: FlValueType = FlValueType::Int64List;

    fn extract(value: &FlValue) -> Option<Self> {
        match value {
            FlValue::Int64List(v) => Some(v.clone()),
            FlValue::Int32List(v) => Some(v.iter().map(|i| *i as i64).collect()),
            FlValue::List(items) => items.iter().map(FlValue::as_i64).collect(),
            _ => None,
        }
    }
}

impl FromFlValue for Vec<FlValue> {
    const EXPECTED: FlValueType = FlValueType::List;

    fn extract(value: &FlValue) -> Option<Self> {
        match value {
            FlValue::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl FromFlValue for HashMap<String, String> {
    const EXPECTED: FlValueType = FlValueType::Map;

    fn extract(value: &FlValue) -> Option<Self> {
        match value {
            FlValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| Some((k.as_str()?.to_string(), v.as_str()?.to_string())))
                .collect(),
            _ => None,
        }
    }
}

// === 原生类型 -> 变体 ===

impl From<bool> for FlValue {
    fn from(value: bool) -> Self {
        FlValue::Bool(value)
    }
}

impl From<i64> for FlValue {
    fn from(value: i64) -> Self {
        FlValue::Int(value)
    }
}

impl From<i32> for FlValue {
    fn from(value: i32) -> Self {
        FlValue::Int(value as i64)
    }
}

impl From<u32> for FlValue {
    fn from(value: u32) -> Self {
        FlValue::Int(value as i64)
    }
}

impl From<f64> for FlValue {
    fn from(value: f64) -> Self {
        FlValue::Float(value)
    }
}

impl From<String> for FlValue {
    fn from(value: String) -> Self {
        FlValue::String(value)
    }
}

impl From<&str> for FlValue {
    fn from(value: &str) -> Self {
        FlValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for FlValue {
    fn from(value: Vec<u8>) -> Self {
        FlValue::Uint8List(value)
    }
}

impl From<Vec<i64>> for FlValue {
    fn from(value: Vec<i64>) -> Self {
        FlValue::Int64List(value)
    }
}

impl From<Vec<f64>> for FlValue {
    fn from(value: Vec<f64>) -> Self {
        FlValue::Float64List(value)
    }
}

impl From<Vec<String>> for FlValue {
    fn from(value: Vec<String>) -> Self {
        FlValue::List(value.into_iter().map(FlValue::String).collect())
    }
}

impl From<Vec<FlValue>> for FlValue {
    fn from(value: Vec<FlValue>) -> Self {
        FlValue::List(value)
    }
}

impl<T: Into<FlValue>> From<HashMap<String, T>> for FlValue {
    fn from(value: HashMap<String, T>) -> Self {
        let mut entries: Vec<(FlValue, FlValue)> = value
            .into_iter()
            .map(|(k, v)| (FlValue::String(k), v.into()))
            .collect();
        // HashMap 无序，排序后保证输出稳定
        entries.sort_by(|(a, _), (b, _)| a.as_str().cmp(&b.as_str()));
        FlValue::Map(entries)
    }
}

impl<T: Into<FlValue>> From<Option<T>> for FlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FlValue::Null,
        }
    }
}

/// 生成变体值，`None` 变为 `Null`
pub fn make_fl_value<T: Into<FlValue>>(value: T) -> FlValue {
    value.into()
}

/// 由键值对构建 map，`Null` 值同样写入
pub fn to_fl_map<K, I>(pairs: I) -> FlValue
where
    K: Into<String>,
    I: IntoIterator<Item = (K, FlValue)>,
{
    FlValue::Map(
        pairs
            .into_iter()
            .map(|(k, v)| (FlValue::String(k.into()), v))
            .collect(),
    )
}

/// 严格查找：区分不是 map、缺失键与类型不匹配
/// `Null` 值按缺失处理
pub fn try_get_fl_map_value<T: FromFlValue>(map: &FlValue, key: &str) -> Result<T, LookupError> {
    if !map.is_map() {
        return Err(LookupError::NotAMap);
    }

    let value = match map.lookup_string(key) {
        Some(v) if !v.is_null() => v,
        _ => return Err(LookupError::NotFound(key.to_string())),
    };

    T::extract(value).ok_or_else(|| LookupError::TypeMismatch {
        key: key.to_string(),
        expected: T::EXPECTED,
        found: value.value_type(),
    })
}

/// 查找键值，任何失败都返回默认值
pub fn get_fl_map_value<T: FromFlValue>(map: &FlValue, key: &str, default: T) -> T {
    try_get_fl_map_value(map, key).unwrap_or(default)
}

/// 查找键值，任何失败都返回 None
pub fn get_optional_fl_map_value<T: FromFlValue>(map: &FlValue, key: &str) -> Option<T> {
    try_get_fl_map_value(map, key).ok()
}

/// 取出原始子值（不做类型转换），`Null` 视为缺失
pub fn get_fl_map_value_raw<'a>(map: &'a FlValue, key: &str) -> Option<&'a FlValue> {
    map.lookup_string(key).filter(|v| !v.is_null())
}
