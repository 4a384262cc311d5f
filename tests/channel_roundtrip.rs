// 原生 -> 编码 -> Dart 处理 -> 应答信封 -> DTO 的完整链路

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use inappwebview_bridge_lib::codec::MethodCall;
use inappwebview_bridge_lib::types::{
    DownloadStartRequest, DownloadStartResponseAction, ServerTrustAuthResponseAction,
    ServerTrustChallenge, ShowFileChooserRequest, URLCredential, URLProtectionSpace,
};
use inappwebview_bridge_lib::value::{get_fl_map_value, make_fl_value, to_fl_map};
use inappwebview_bridge_lib::{
    BinaryMessenger, BridgeConfig, ChannelError, CodecMethodChannel, DownloadDisposition,
    FlValue, FlValueCodec, MethodCallHandler, WebViewChannelDelegate,
};

/// 模拟 Dart 端：按方法名返回预设结果
struct DartSide {
    replies: Vec<(&'static str, Result<FlValue, ChannelError>)>,
    received: Mutex<Vec<MethodCall>>,
}

#[async_trait]
impl MethodCallHandler for DartSide {
    async fn handle(&self, call: MethodCall) -> Result<FlValue, ChannelError> {
        let reply = self
            .replies
            .iter()
            .find(|(method, _)| *method == call.method)
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Err(ChannelError::NotImplemented));
        self.received.lock().unwrap().push(call);
        reply
    }
}

/// 把编码后的消息交给 Dart 端处理，返回编码后的应答
struct Engine {
    dart: Arc<DartSide>,
}

struct Unused;

#[async_trait]
impl BinaryMessenger for Unused {
    async fn send(&self, _channel: &str, _message: Bytes) -> Result<Vec<u8>, ChannelError> {
        Err(ChannelError::Transport("unused".into()))
    }
}

#[async_trait]
impl BinaryMessenger for Engine {
    async fn send(&self, channel: &str, message: Bytes) -> Result<Vec<u8>, ChannelError> {
        let dart_channel = CodecMethodChannel::new(channel, Unused);
        let reply = dart_channel
            .dispatch_incoming(&message, self.dart.as_ref())
            .await;
        Ok(reply.to_vec())
    }
}

fn delegate_with(
    replies: Vec<(&'static str, Result<FlValue, ChannelError>)>,
) -> (WebViewChannelDelegate, Arc<DartSide>) {
    let dart = Arc::new(DartSide {
        replies,
        received: Mutex::new(Vec::new()),
    });
    let config = BridgeConfig::default();
    let channel = CodecMethodChannel::new(config.channel_name(7), Engine { dart: dart.clone() });
    (WebViewChannelDelegate::new(Arc::new(channel)), dart)
}

fn download_request() -> DownloadStartRequest {
    DownloadStartRequest {
        url: Some("https://example.com/f.bin".into()),
        suggested_filename: Some("f.bin".into()),
        mime_type: Some("application/octet-stream".into()),
        content_length: Some(1024),
        ..Default::default()
    }
}

#[tokio::test]
async fn download_allowed_with_destination() {
    let (delegate, dart) = delegate_with(vec![(
        "onDownloadStarting",
        Ok(to_fl_map([
            ("action", make_fl_value(1i64)),
            ("destinationPath", make_fl_value("/tmp/f.bin")),
        ])),
    )]);

    let response = delegate.on_download_starting(&download_request()).await;
    assert_eq!(response.action, DownloadStartResponseAction::Allow);
    assert_eq!(response.destination_path.as_deref(), Some("/tmp/f.bin"));

    let disposition = DownloadDisposition::resolve(&response, Some("f.bin"), &BridgeConfig::default());
    assert_eq!(disposition.path(), Some(std::path::Path::new("/tmp/f.bin")));

    // Dart 端收到的参数与请求一致
    let received = dart.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        DownloadStartRequest::from_fl_value(Some(&received[0].arguments)),
        download_request()
    );
}

#[tokio::test]
async fn empty_download_reply_cancels() {
    let (delegate, _) = delegate_with(vec![("onDownloadStarting", Ok(FlValue::new_map()))]);

    let response = delegate.on_download_starting(&download_request()).await;
    assert_eq!(response.action, DownloadStartResponseAction::Cancel);
    assert_eq!(response.destination_path, None);
    assert_eq!(
        DownloadDisposition::resolve(&response, Some("f.bin"), &BridgeConfig::default()),
        DownloadDisposition::Cancel
    );
}

#[tokio::test]
async fn unimplemented_and_errors_fail_closed() {
    let (delegate, _) = delegate_with(vec![(
        "onReceivedServerTrustAuthRequest",
        Err(ChannelError::method_error("ERROR", "handler threw")),
    )]);

    let challenge = ServerTrustChallenge {
        protection_space: URLProtectionSpace {
            host: "expired.example".into(),
            port: 443,
            protocol: Some("https".into()),
            ..Default::default()
        },
        certificate_der: Some(vec![0x30, 0x82, 0x01, 0x0a]),
        ..Default::default()
    };
    let trust = delegate
        .on_received_server_trust_auth_request(&challenge)
        .await;
    assert_eq!(trust.action, ServerTrustAuthResponseAction::Cancel);

    // onShowFileChooser 未注册
    let chooser = delegate
        .on_show_file_chooser(&ShowFileChooserRequest::default())
        .await;
    assert!(!chooser.handled_by_client);
    assert_eq!(chooser.file_paths, None);
}

#[tokio::test]
async fn malformed_replies_fail_closed() {
    let malformed = [
        FlValue::Null,
        FlValue::Int(1),
        FlValue::String("PROCEED".into()),
        to_fl_map([("action", make_fl_value("1"))]),
        to_fl_map([("action", make_fl_value(99i64))]),
        to_fl_map([("handledByClient", make_fl_value("yes"))]),
    ];

    for reply in malformed {
        let (delegate, _) = delegate_with(vec![
            ("onReceivedServerTrustAuthRequest", Ok(reply.clone())),
            ("onShowFileChooser", Ok(reply.clone())),
            ("onDownloadStarting", Ok(reply)),
        ]);

        let trust = delegate
            .on_received_server_trust_auth_request(&ServerTrustChallenge::default())
            .await;
        assert!(!trust.proceeds());

        let chooser = delegate
            .on_show_file_chooser(&ShowFileChooserRequest::default())
            .await;
        assert!(!chooser.handled_by_client);
        assert_eq!(chooser.file_paths, None);

        let download = delegate.on_download_starting(&download_request()).await;
        assert_eq!(download.action, DownloadStartResponseAction::Cancel);
    }
}

#[tokio::test]
async fn credential_survives_the_wire() {
    let credential = URLCredential {
        username: Some("alice".into()),
        password: None,
    };
    let (delegate, dart) = delegate_with(vec![(
        "onReceivedHttpAuthRequest",
        Ok(to_fl_map([
            ("action", make_fl_value(1i64)),
            ("username", make_fl_value("alice")),
            ("password", make_fl_value("secret")),
            ("permanentPersistence", make_fl_value(true)),
        ])),
    )]);

    let challenge = inappwebview_bridge_lib::types::HttpAuthenticationChallenge {
        proposed_credential: Some(credential.clone()),
        ..Default::default()
    };
    let response = delegate.on_received_http_auth_request(&challenge).await;
    assert!(response.permanent_persistence);
    assert_eq!(response.credential(), Some(URLCredential::new("alice", "secret")));

    let received = dart.received.lock().unwrap();
    let proposed = received[0].arguments.lookup_string("proposedCredential");
    assert_eq!(URLCredential::from_fl_value(proposed), credential);
    assert_eq!(
        get_fl_map_value(&received[0].arguments, "previousFailureCount", -1i64),
        0
    );
}
