use std::sync::Arc;

use super::traits::{ChannelError, MethodChannel};
use crate::types::{
    DownloadStartRequest, DownloadStartResponse, FlValueCodec, HttpAuthResponse,
    HttpAuthenticationChallenge, ServerTrustAuthResponse, ServerTrustChallenge,
    ShowFileChooserRequest, ShowFileChooserResponse,
};
use crate::value::{make_fl_value, to_fl_map, FlValue};

/// WebView 回调到 Dart 的委托
///
/// 每个回调把请求编码后经方法通道发给 Dart，再把应答解码为对应的 DTO。
/// 通道不存在、调用出错或 Dart 未实现时，返回各 DTO 的默认值（取消 / 拒绝 / 未处理）。
pub struct WebViewChannelDelegate {
    channel: Option<Arc<dyn MethodChannel>>,
}

impl WebViewChannelDelegate {
    pub fn new(channel: Arc<dyn MethodChannel>) -> Self {
        Self {
            channel: Some(channel),
        }
    }

    /// 未连接通道的委托，所有回调都走默认值
    pub fn detached() -> Self {
        Self { channel: None }
    }

    pub fn is_attached(&self) -> bool {
        self.channel.is_some()
    }

    /// WebView 销毁时断开通道，之后的回调都走默认值
    pub fn dispose(&mut self) {
        self.channel = None;
    }

    async fn invoke_for<T: FlValueCodec>(&self, method: &str, arguments: FlValue) -> T {
        let Some(channel) = &self.channel else {
            log::debug!("{}: 通道已断开，使用默认行为", method);
            return T::from_fl_value(None);
        };

        match channel.invoke_method(method, arguments).await {
            Ok(result) => T::from_fl_value(Some(&result)),
            Err(ChannelError::NotImplemented) => {
                log::debug!("{}: Dart 端未实现，使用默认行为", method);
                T::from_fl_value(None)
            }
            Err(e) => {
                log::warn!("{} 调用失败，使用默认行为: {}", method, e);
                T::from_fl_value(None)
            }
        }
    }

    pub async fn on_download_starting(&self, request: &DownloadStartRequest) -> DownloadStartResponse {
        self.invoke_for("onDownloadStarting", request.to_fl_value())
            .await
    }

    pub async fn on_received_server_trust_auth_request(
        &self,
        challenge: &ServerTrustChallenge,
    ) -> ServerTrustAuthResponse {
        self.invoke_for("onReceivedServerTrustAuthRequest", challenge.to_fl_value())
            .await
    }

    pub async fn on_received_http_auth_request(
        &self,
        challenge: &HttpAuthenticationChallenge,
    ) -> HttpAuthResponse {
        self.invoke_for("onReceivedHttpAuthRequest", challenge.to_fl_value())
            .await
    }

    pub async fn on_show_file_chooser(&self, request: &ShowFileChooserRequest) -> ShowFileChooserResponse {
        self.invoke_for("onShowFileChooser", request.to_fl_value())
            .await
    }

    /// 网站图标变化，只通知不等待结果
    pub async fn on_received_icon(&self, url: Option<&str>) {
        let Some(channel) = &self.channel else {
            return;
        };

        let args = to_fl_map([("url", make_fl_value(url.map(str::to_string)))]);
        match channel.invoke_method("onReceivedIcon", args).await {
            Ok(_) | Err(ChannelError::NotImplemented) => {}
            Err(e) => log::warn!("onReceivedIcon 调用失败: {}", e),
        }
    }
}
