use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::CodecError;
use crate::value::FlValue;

const NULL: u8 = 0;
const TRUE: u8 = 1;
const FALSE: u8 = 2;
const INT32: u8 = 3;
const INT64: u8 = 4;
const LARGE_INT: u8 = 5;
const FLOAT64: u8 = 6;
const STRING: u8 = 7;
const UINT8_LIST: u8 = 8;
const INT32_LIST: u8 = 9;
const INT64_LIST: u8 = 10;
const FLOAT64_LIST: u8 = 11;
const LIST: u8 = 12;
const MAP: u8 = 13;
const FLOAT32_LIST: u8 = 14;

/// 嵌套层数上限，防止恶意消息耗尽栈空间
pub const MAX_DEPTH: usize = 128;

/// 标准消息编码
/// 小端序，长度使用 1/3/5 字节变长表示，浮点与定长数组按元素宽度对齐
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMessageCodec;

impl StandardMessageCodec {
    /// 编码单个值
    pub fn encode_message(&self, value: &FlValue) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::new();
        self.write_value(&mut buf, value)?;
        Ok(buf.freeze())
    }

    /// 解码单个值，空消息视为 Null
    pub fn decode_message(&self, message: &[u8]) -> Result<FlValue, CodecError> {
        if message.is_empty() {
            return Ok(FlValue::Null);
        }

        let mut reader = Reader::new(message);
        let value = self.read_value(&mut reader)?;
        if reader.remaining() > 0 {
            return Err(CodecError::TrailingData(reader.remaining()));
        }
        Ok(value)
    }

    pub(crate) fn write_value(&self, buf: &mut BytesMut, value: &FlValue) -> Result<(), CodecError> {
        match value {
            FlValue::Null => buf.put_u8(NULL),
            FlValue::Bool(true) => buf.put_u8(TRUE),
            FlValue::Bool(false) => buf.put_u8(FALSE),
            FlValue::Int(i) => match i32::try_from(*i) {
                Ok(small) => {
                    buf.put_u8(INT32);
                    buf.put_i32_le(small);
                }
                Err(_) => {
                    buf.put_u8(INT64);
                    buf.put_i64_le(*i);
                }
            },
            FlValue::Float(f) => {
                buf.put_u8(FLOAT64);
                write_alignment(buf, 8);
                buf.put_f64_le(*f);
            }
            FlValue::String(s) => {
                buf.put_u8(STRING);
                write_size(buf, s.len())?;
                buf.put_slice(s.as_bytes());
            }
            FlValue::Uint8List(v) => {
                buf.put_u8(UINT8_LIST);
                write_size(buf, v.len())?;
                buf.put_slice(v);
            }
            FlValue::Int32List(v) => {
                buf.put_u8(INT32_LIST);
                write_size(buf, v.len())?;
                write_alignment(buf, 4);
                v.iter().for_each(|x| buf.put_i32_le(*x));
            }
            FlValue::Int64List(v) => {
                buf.put_u8(INT64_LIST);
                write_size(buf, v.len())?;
                write_alignment(buf, 8);
                v.iter().for_each(|x| buf.put_i64_le(*x));
            }
            FlValue::Float32List(v) => {
                buf.put_u8(FLOAT32_LIST);
                write_size(buf, v.len())?;
                write_alignment(buf, 4);
                v.iter().for_each(|x| buf.put_f32_le(*x));
            }
            FlValue::Float64List(v) => {
                buf.put_u8(FLOAT64_LIST);
                write_size(buf, v.len())?;
                write_alignment(buf, 8);
                v.iter().for_each(|x| buf.put_f64_le(*x));
            }
            FlValue::List(items) => {
                buf.put_u8(LIST);
                write_size(buf, items.len())?;
                for item in items {
                    self.write_value(buf, item)?;
                }
            }
            FlValue::Map(entries) => {
                buf.put_u8(MAP);
                write_size(buf, entries.len())?;
                for (k, v) in entries {
                    self.write_value(buf, k)?;
                    self.write_value(buf, v)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn read_value(&self, reader: &mut Reader<'_>) -> Result<FlValue, CodecError> {
        self.read_value_at_depth(reader, 0)
    }

    fn read_value_at_depth(
        &self,
        reader: &mut Reader<'_>,
        depth: usize,
    ) -> Result<FlValue, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::TooDeep(MAX_DEPTH));
        }

        let offset = reader.position();
        let tag = reader.read_u8()?;
        let value = match tag {
            NULL => FlValue::Null,
            TRUE => FlValue::Bool(true),
            FALSE => FlValue::Bool(false),
            INT32 => FlValue::Int(reader.take(4)?.get_i32_le() as i64),
            INT64 => FlValue::Int(reader.take(8)?.get_i64_le()),
            FLOAT64 => {
                reader.align(8)?;
                FlValue::Float(reader.take(8)?.get_f64_le())
            }
            // 大整数以十六进制字符串传输，原样保留
            STRING | LARGE_INT => FlValue::String(reader.read_string()?),
            UINT8_LIST => {
                let size = reader.read_size()?;
                FlValue::Uint8List(reader.take(size)?.to_vec())
            }
            INT32_LIST => {
                let mut data = reader.read_typed_list(4)?;
                FlValue::Int32List((0..data.len() / 4).map(|_| data.get_i32_le()).collect())
            }
            INT64_LIST => {
                let mut data = reader.read_typed_list(8)?;
                FlValue::Int64List((0..data.len() / 8).map(|_| data.get_i64_le()).collect())
            }
            FLOAT32_LIST => {
                let mut data = reader.read_typed_list(4)?;
                FlValue::Float32List((0..data.len() / 4).map(|_| data.get_f32_le()).collect())
            }
            FLOAT64_LIST => {
                let mut data = reader.read_typed_list(8)?;
                FlValue::Float64List((0..data.len() / 8).map(|_| data.get_f64_le()).collect())
            }
            LIST => {
                let count = reader.read_count(1)?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.read_value_at_depth(reader, depth + 1)?);
                }
                FlValue::List(items)
            }
            MAP => {
                let count = reader.read_count(2)?;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let k = self.read_value_at_depth(reader, depth + 1)?;
                    let v = self.read_value_at_depth(reader, depth + 1)?;
                    entries.push((k, v));
                }
                FlValue::Map(entries)
            }
            other => return Err(CodecError::UnknownType { tag: other, offset }),
        };
        Ok(value)
    }
}

fn write_size(buf: &mut BytesMut, size: usize) -> Result<(), CodecError> {
    if size < 254 {
        buf.put_u8(size as u8);
    } else if let Ok(size16) = u16::try_from(size) {
        buf.put_u8(254);
        buf.put_u16_le(size16);
    } else if let Ok(size32) = u32::try_from(size) {
        buf.put_u8(255);
        buf.put_u32_le(size32);
    } else {
        return Err(CodecError::TooLarge(size));
    }
    Ok(())
}

/// 对齐是相对于整条消息起始位置计算的
fn write_alignment(buf: &mut BytesMut, alignment: usize) {
    let pad = (alignment - buf.len() % alignment) % alignment;
    buf.put_bytes(0, pad);
}

/// 带偏移量追踪的只读游标
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed: n,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?.get_u8())
    }

    fn read_size(&mut self) -> Result<usize, CodecError> {
        match self.read_u8()? {
            254 => Ok(self.take(2)?.get_u16_le() as usize),
            255 => Ok(self.take(4)?.get_u32_le() as usize),
            small => Ok(small as usize),
        }
    }

    /// 读取元素个数，并确认剩余字节至少能容纳这么多元素
    fn read_count(&mut self, min_bytes_per_item: usize) -> Result<usize, CodecError> {
        let count = self.read_size()?;
        let needed = count.saturating_mul(min_bytes_per_item);
        if needed > self.remaining() {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed,
            });
        }
        Ok(count)
    }

    fn align(&mut self, alignment: usize) -> Result<(), CodecError> {
        let pad = (alignment - self.pos % alignment) % alignment;
        self.take(pad).map(|_| ())
    }

    fn read_string(&mut self) -> Result<String, CodecError> {
        let size = self.read_size()?;
        let offset = self.pos;
        let bytes = self.take(size)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| CodecError::InvalidUtf8(offset))
    }

    fn read_typed_list(&mut self, element_size: usize) -> Result<&'a [u8], CodecError> {
        let count = self.read_size()?;
        self.align(element_size)?;
        let len = count
            .checked_mul(element_size)
            .ok_or(CodecError::TooLarge(count))?;
        self.take(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::{make_fl_value, to_fl_map};
    use proptest::collection::vec;
    use proptest::prelude::*;

    const CODEC: StandardMessageCodec = StandardMessageCodec;

    fn encode(value: &FlValue) -> Vec<u8> {
        CODEC.encode_message(value).unwrap().to_vec()
    }

    #[test]
    fn scalars_have_expected_layout() {
        assert_eq!(encode(&FlValue::Null), vec![0]);
        assert_eq!(encode(&FlValue::Bool(true)), vec![1]);
        assert_eq!(encode(&FlValue::Bool(false)), vec![2]);
        assert_eq!(encode(&FlValue::Int(1)), vec![3, 1, 0, 0, 0]);
        assert_eq!(
            encode(&FlValue::Int(1 << 40)),
            vec![4, 0, 0, 0, 0, 0, 1, 0, 0]
        );
        assert_eq!(encode(&FlValue::String("hi".into())), vec![7, 2, b'h', b'i']);
    }

    #[test]
    fn float_is_aligned_to_eight_bytes() {
        let bytes = encode(&FlValue::Float(1.5));
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 6);
        assert_eq!(&bytes[1..8], &[0; 7]);
        assert_eq!(&bytes[8..], &1.5f64.to_le_bytes());
    }

    #[test]
    fn long_sizes_use_extended_prefix() {
        let s = "x".repeat(300);
        let bytes = encode(&FlValue::String(s.clone()));
        assert_eq!(&bytes[..4], &[7, 254, 0x2c, 0x01]);
        assert_eq!(CODEC.decode_message(&bytes).unwrap(), FlValue::String(s));

        let big = vec![0u8; 70_000];
        let bytes = encode(&FlValue::Uint8List(big.clone()));
        assert_eq!(bytes[1], 255);
        assert_eq!(CODEC.decode_message(&bytes).unwrap(), FlValue::Uint8List(big));
    }

    #[test]
    fn nested_map_decodes_back() {
        let value = to_fl_map([
            ("action", make_fl_value(1i64)),
            ("destinationPath", make_fl_value("/tmp/f.bin")),
            ("ratio", make_fl_value(0.25)),
            ("ids", FlValue::Int32List(vec![1, -2, 3])),
            ("weights", FlValue::Float32List(vec![0.5, 2.0])),
            ("nested", FlValue::List(vec![FlValue::Null, FlValue::Int64List(vec![7])])),
        ]);

        assert_eq!(CODEC.decode_message(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn empty_message_is_null() {
        assert_eq!(CODEC.decode_message(&[]).unwrap(), FlValue::Null);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(
            CODEC.decode_message(&[3, 1, 0]),
            Err(CodecError::Truncated { offset: 1, needed: 4 })
        );
        assert_eq!(
            CODEC.decode_message(&[42]),
            Err(CodecError::UnknownType { tag: 42, offset: 0 })
        );
        assert_eq!(
            CODEC.decode_message(&[7, 1, 0xff]),
            Err(CodecError::InvalidUtf8(2))
        );
        assert_eq!(CODEC.decode_message(&[0, 0]), Err(CodecError::TrailingData(1)));
        // 声明了 200 个元素但没有数据
        assert!(matches!(
            CODEC.decode_message(&[12, 200]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut bytes = vec![12u8, 1].repeat(MAX_DEPTH + 2);
        bytes.push(0);
        assert_eq!(
            CODEC.decode_message(&bytes),
            Err(CodecError::TooDeep(MAX_DEPTH))
        );
    }

    fn arb_leaf() -> impl Strategy<Value = FlValue> {
        prop_oneof![
            Just(FlValue::Null),
            any::<bool>().prop_map(FlValue::Bool),
            any::<i64>().prop_map(FlValue::Int),
            any::<f64>()
                .prop_filter("NaN != NaN", |f| !f.is_nan())
                .prop_map(FlValue::Float),
            ".*".prop_map(FlValue::String),
            vec(any::<u8>(), 0..16).prop_map(FlValue::Uint8List),
            vec(any::<i32>(), 0..8).prop_map(FlValue::Int32List),
            vec(any::<i64>(), 0..8).prop_map(FlValue::Int64List),
        ]
    }

    fn arb_value() -> impl Strategy<Value = FlValue> {
        arb_leaf().prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..6).prop_map(FlValue::List),
                vec((".*".prop_map(FlValue::String), inner), 0..6).prop_map(FlValue::Map),
            ]
        })
    }

    #[test]
    fn test_roundtrip_value() {
        proptest!(|(value in arb_value())| {
            prop_assert_eq!(CODEC.decode_message(&encode(&value)).unwrap(), value);
        })
    }
}
