use std::fmt;

/// 平台通道的变体值
/// 与 Flutter 标准消息编码支持的类型一一对应
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FlValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Uint8List(Vec<u8>),
    Int32List(Vec<i32>),
    Int64List(Vec<i64>),
    Float32List(Vec<f32>),
    Float64List(Vec<f64>),
    List(Vec<FlValue>),
    /// 保持插入顺序，键可以是任意变体
    Map(Vec<(FlValue, FlValue)>),
}

/// 变体类型标签，用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlValueType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Uint8List,
    Int32List,
    Int64List,
    Float32List,
    Float64List,
    List,
    Map,
}

impl FlValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlValueType::Null => "null",
            FlValueType::Bool => "bool",
            FlValueType::Int => "int",
            FlValueType::Float => "float",
            FlValueType::String => "string",
            FlValueType::Uint8List => "uint8list",
            FlValueType::Int32List => "int32list",
            FlValueType::Int64List => "int64list",
            FlValueType::Float32List => "float32list",
            FlValueType::Float64List => "float64list",
            FlValueType::List => "list",
            FlValueType::Map => "map",
        }
    }
}

impl fmt::Display for FlValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FlValue {
    pub fn value_type(&self) -> FlValueType {
        match self {
            FlValue::Null => FlValueType::Null,
            FlValue::Bool(_) => FlValueType::Bool,
            FlValue::Int(_) => FlValueType::Int,
            FlValue::Float(_) => FlValueType::Float,
            FlValue::String(_) => FlValueType::String,
            FlValue::Uint8List(_) => FlValueType::Uint8List,
            FlValue::Int32List(_) => FlValueType::Int32List,
            FlValue::Int64List(_) => FlValueType::Int64List,
            FlValue::Float32List(_) => FlValueType::Float32List,
            FlValue::Float64List(_) => FlValueType::Float64List,
            FlValue::List(_) => FlValueType::List,
            FlValue::Map(_) => FlValueType::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FlValue::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, FlValue::Map(_))
    }

    /// 空 map
    pub fn new_map() -> Self {
        FlValue::Map(Vec::new())
    }

    /// 按字符串键查找 map 条目，返回第一个匹配项
    /// 非 map 值总是返回 None
    pub fn lookup_string(&self, key: &str) -> Option<&FlValue> {
        match self {
            FlValue::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                FlValue::String(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    /// 写入字符串键，已存在时覆盖原值
    /// 非 map 值被忽略
    pub fn set_string(&mut self, key: &str, value: FlValue) {
        if let FlValue::Map(entries) = self {
            for (k, v) in entries.iter_mut() {
                if matches!(k, FlValue::String(s) if s == key) {
                    *v = value;
                    return;
                }
            }
            entries.push((FlValue::String(key.to_string()), value));
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FlValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 列表或 map 的长度，标量返回 0
    pub fn len(&self) -> usize {
        match self {
            FlValue::Uint8List(v) => v.len(),
            FlValue::Int32List(v) => v.len(),
            FlValue::Int64List(v) => v.len(),
            FlValue::Float32List(v) => v.len(),
            FlValue::Float64List(v) => v.len(),
            FlValue::List(v) => v.len(),
            FlValue::Map(v) => v.len(),
            FlValue::String(s) => s.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
