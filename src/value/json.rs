// FlValue 与 JSON 之间的互转
// 用于日志、诊断工具以及测试数据

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::types::FlValue;

impl Serialize for FlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlValue::Null => serializer.serialize_unit(),
            FlValue::Bool(b) => serializer.serialize_bool(*b),
            FlValue::Int(i) => serializer.serialize_i64(*i),
            FlValue::Float(f) => serializer.serialize_f64(*f),
            FlValue::String(s) => serializer.serialize_str(s),
            FlValue::Uint8List(v) => v.serialize(serializer),
            FlValue::Int32List(v) => v.serialize(serializer),
            FlValue::Int64List(v) => v.serialize(serializer),
            FlValue::Float32List(v) => v.serialize(serializer),
            FlValue::Float64List(v) => v.serialize(serializer),
            FlValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FlValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    // JSON 只允许字符串键
                    match k {
                        FlValue::String(s) => map.serialize_entry(s, v)?,
                        other => map.serialize_entry(&json_key(other), v)?,
                    }
                }
                map.end()
            }
        }
    }
}

fn json_key(key: &FlValue) -> String {
    match serde_json::to_string(key) {
        Ok(s) => s,
        Err(_) => key.value_type().to_string(),
    }
}

impl From<serde_json::Value> for FlValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FlValue::Null,
            serde_json::Value::Bool(b) => FlValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FlValue::Int(i),
                None => FlValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => FlValue::String(s),
            serde_json::Value::Array(items) => {
                FlValue::List(items.into_iter().map(FlValue::from).collect())
            }
            serde_json::Value::Object(entries) => FlValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (FlValue::String(k), FlValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl FlValue {
    /// 转成 JSON，非字符串键会被序列化成字符串
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
