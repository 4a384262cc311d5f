use bytes::{BufMut, Bytes, BytesMut};

use super::message::{Reader, StandardMessageCodec};
use super::CodecError;
use crate::value::FlValue;

const ENVELOPE_SUCCESS: u8 = 0;
const ENVELOPE_ERROR: u8 = 1;

/// 方法调用：方法名 + 参数
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: FlValue,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: FlValue) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// 解码后的应答信封
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(FlValue),
    Error {
        code: String,
        message: Option<String>,
        details: FlValue,
    },
}

/// 标准方法编码，基于标准消息编码
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMethodCodec {
    codec: StandardMessageCodec,
}

impl StandardMethodCodec {
    pub fn encode_method_call(&self, call: &MethodCall) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::new();
        self.codec
            .write_value(&mut buf, &FlValue::String(call.method.clone()))?;
        self.codec.write_value(&mut buf, &call.arguments)?;
        Ok(buf.freeze())
    }

    pub fn decode_method_call(&self, message: &[u8]) -> Result<MethodCall, CodecError> {
        let mut reader = Reader::new(message);
        let method = match self.codec.read_value(&mut reader)? {
            FlValue::String(method) => method,
            other => {
                return Err(CodecError::InvalidMethodCall(format!(
                    "method name must be a string, got {}",
                    other.value_type()
                )))
            }
        };
        let arguments = self.codec.read_value(&mut reader)?;
        if reader.remaining() > 0 {
            return Err(CodecError::TrailingData(reader.remaining()));
        }
        Ok(MethodCall { method, arguments })
    }

    pub fn encode_success_envelope(&self, result: &FlValue) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::new();
        buf.put_u8(ENVELOPE_SUCCESS);
        self.codec.write_value(&mut buf, result)?;
        Ok(buf.freeze())
    }

    pub fn encode_error_envelope(
        &self,
        code: &str,
        message: Option<&str>,
        details: &FlValue,
    ) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::new();
        buf.put_u8(ENVELOPE_ERROR);
        self.codec
            .write_value(&mut buf, &FlValue::String(code.to_string()))?;
        self.codec
            .write_value(&mut buf, &FlValue::from(message.map(str::to_string)))?;
        self.codec.write_value(&mut buf, details)?;
        Ok(buf.freeze())
    }

    /// 解码应答信封
    /// 错误信封可能在末尾带一个堆栈字符串（Android 端），读取后忽略
    pub fn decode_envelope(&self, envelope: &[u8]) -> Result<MethodResponse, CodecError> {
        let mut reader = Reader::new(envelope);
        let response = match reader.read_u8() {
            Ok(ENVELOPE_SUCCESS) => MethodResponse::Success(self.codec.read_value(&mut reader)?),
            Ok(ENVELOPE_ERROR) => {
                let code = match self.codec.read_value(&mut reader)? {
                    FlValue::String(code) => code,
                    other => {
                        return Err(CodecError::InvalidEnvelope(format!(
                            "error code must be a string, got {}",
                            other.value_type()
                        )))
                    }
                };
                let message = match self.codec.read_value(&mut reader)? {
                    FlValue::String(message) => Some(message),
                    FlValue::Null => None,
                    other => {
                        return Err(CodecError::InvalidEnvelope(format!(
                            "error message must be a string or null, got {}",
                            other.value_type()
                        )))
                    }
                };
                let details = self.codec.read_value(&mut reader)?;
                if reader.remaining() > 0 {
                    self.codec.read_value(&mut reader)?;
                }
                MethodResponse::Error {
                    code,
                    message,
                    details,
                }
            }
            Ok(other) => {
                return Err(CodecError::InvalidEnvelope(format!(
                    "unknown envelope tag {}",
                    other
                )))
            }
            Err(_) => return Err(CodecError::InvalidEnvelope("empty envelope".to_string())),
        };

        if reader.remaining() > 0 {
            return Err(CodecError::TrailingData(reader.remaining()));
        }
        Ok(response)
    }
}
