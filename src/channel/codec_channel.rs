use async_trait::async_trait;
use bytes::Bytes;

use super::traits::{BinaryMessenger, ChannelError, MethodCallHandler, MethodChannel};
use crate::codec::{MethodCall, MethodResponse, StandardMethodCodec};
use crate::value::FlValue;

/// 基于标准方法编码的方法通道
pub struct CodecMethodChannel<M: BinaryMessenger> {
    name: String,
    messenger: M,
    codec: StandardMethodCodec,
}

impl<M: BinaryMessenger> CodecMethodChannel<M> {
    pub fn new(name: impl Into<String>, messenger: M) -> Self {
        Self {
            name: name.into(),
            messenger,
            codec: StandardMethodCodec::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 处理 Dart 端发来的方法调用，返回编码后的应答
    /// 处理器未实现时返回空应答
    pub async fn dispatch_incoming(&self, message: &[u8], handler: &dyn MethodCallHandler) -> Bytes {
        let call = match self.codec.decode_method_call(message) {
            Ok(call) => call,
            Err(e) => {
                log::warn!("[{}] 无法解码方法调用: {}", self.name, e);
                return self.error_reply("INVALID_METHOD_CALL", Some(&e.to_string()), &FlValue::Null);
            }
        };

        let method = call.method.clone();
        log::debug!("[{}] 收到方法调用: {}", self.name, method);

        match handler.handle(call).await {
            Ok(result) => match self.codec.encode_success_envelope(&result) {
                Ok(reply) => reply,
                Err(e) => {
                    log::warn!("[{}] {} 的返回值无法编码: {}", self.name, method, e);
                    self.error_reply("ENCODE_ERROR", Some(&e.to_string()), &FlValue::Null)
                }
            },
            Err(ChannelError::NotImplemented) => Bytes::new(),
            Err(ChannelError::MethodError {
                code,
                message,
                details,
            }) => self.error_reply(&code, message.as_deref(), &details),
            Err(other) => self.error_reply("CHANNEL_ERROR", Some(&other.to_string()), &FlValue::Null),
        }
    }

    fn error_reply(&self, code: &str, message: Option<&str>, details: &FlValue) -> Bytes {
        self.codec
            .encode_error_envelope(code, message, details)
            .or_else(|_| self.codec.encode_error_envelope(code, message, &FlValue::Null))
            .unwrap_or_default()
    }
}

#[async_trait]
impl<M: BinaryMessenger> MethodChannel for CodecMethodChannel<M> {
    async fn invoke_method(
        &self,
        method: &str,
        arguments: FlValue,
    ) -> Result<FlValue, ChannelError> {
        let message = self
            .codec
            .encode_method_call(&MethodCall::new(method, arguments))?;
        let reply = self.messenger.send(&self.name, message).await?;

        if reply.is_empty() {
            return Err(ChannelError::NotImplemented);
        }

        match self.codec.decode_envelope(&reply)? {
            MethodResponse::Success(value) => Ok(value),
            MethodResponse::Error {
                code,
                message,
                details,
            } => Err(ChannelError::MethodError {
                code,
                message,
                details,
            }),
        }
    }
}
