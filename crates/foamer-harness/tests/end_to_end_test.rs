//! End-to-end tests: real form driver, real HTTP, real service.
//!
//! The service runs on an ephemeral port. The client side uses `SimEnv` so the
//! success auto-hide can be crossed without waiting.

use foamer_client::{
    AUTH_FAILED_TEXT, FormAction, FormConfig, HttpTransport, PostRequest, SUCCESS_TEXT,
    StatusKind, Submitter, Transport,
};
use foamer_core::{MemoryStorage, Storage};
use foamer_harness::{ScriptedTransport, SimEnv};
use foamer_proto::PostMessageRequest;
use foamer_server::{Server, ServerRuntimeConfig, ServiceConfig};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

/// Running service plus the handle that stops it.
struct TestServer {
    base_url: String,
    storage: MemoryStorage,
    stop: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start(api_key: Option<&str>) -> Self {
        let config = ServerRuntimeConfig {
            bind_address: "127.0.0.1:0".to_string(),
            service: ServiceConfig { api_key: api_key.map(str::to_string) },
        };
        let server = Server::bind(config).await.unwrap();
        let base_url = format!("http://{}", server.local_addr().unwrap());
        let storage = server.storage().clone();

        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(server.run_until(async move {
            let _ = stopped.await;
        }));

        Self { base_url, storage, stop: Some(stop) }
    }

    fn submitter(&self, requires_api_key: bool) -> Submitter<SimEnv, HttpTransport> {
        let config = FormConfig {
            base_url: self.base_url.clone(),
            requires_api_key,
            ..FormConfig::default()
        };
        Submitter::new(SimEnv::new(), config, direct_transport())
    }
}

/// Transport that ignores any proxy configured in the environment.
fn direct_transport() -> HttpTransport {
    HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

/// Accept one connection, answer `200`, and return the raw request.
async fn capture_one_request(listener: TcpListener) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        raw.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&raw);
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .find_map(|line| {
                    let line = line.to_ascii_lowercase();
                    line.strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if raw.len() >= end + 4 + body_len {
                break;
            }
        }
        if n == 0 {
            break;
        }
    }
    socket
        .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
        .await
        .unwrap();
    String::from_utf8(raw).unwrap()
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

#[tokio::test]
async fn message_reaches_open_service() {
    let server = TestServer::start(None).await;
    let mut submitter = server.submitter(false);

    submitter.set_content("  see you at the stop  ").unwrap();
    submitter.submit().await.unwrap();

    let status = submitter.form().status().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, SUCCESS_TEXT);
    assert_eq!(submitter.form().content(), "");

    let stored = server.storage.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "see you at the stop");

    assert_eq!(submitter.settle().await.unwrap(), vec![FormAction::HideStatus]);
}

#[tokio::test]
async fn wrong_key_is_reported_and_fields_kept() {
    let server = TestServer::start(Some("s3cret")).await;
    let mut submitter = server.submitter(true);

    submitter.set_content("hello").unwrap();
    submitter.set_api_key("guess").unwrap();
    submitter.submit().await.unwrap();

    assert_eq!(submitter.form().status().unwrap().text, AUTH_FAILED_TEXT);
    assert_eq!(submitter.form().content(), "hello");
    assert_eq!(submitter.form().api_key(), "guess");
    assert!(submitter.form().inputs_enabled());
    assert!(server.storage.is_empty());

    submitter.set_api_key("s3cret").unwrap();
    submitter.submit().await.unwrap();
    assert_eq!(submitter.form().status().unwrap().kind, StatusKind::Success);
    assert_eq!(server.storage.len(), 1);
}

#[tokio::test]
async fn missing_required_key_never_sends() {
    let server = TestServer::start(Some("s3cret")).await;
    let mut submitter = server.submitter(true);

    submitter.set_content("hello").unwrap();
    let actions = submitter.submit().await.unwrap();

    assert!(!actions.iter().any(|a| matches!(a, FormAction::Post(_))));
    assert!(server.storage.is_empty());
}

#[tokio::test]
async fn http_transport_sends_request_headers() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = tokio::spawn(capture_one_request(listener));

    let request = PostRequest {
        url: format!("http://{addr}/messages"),
        api_key: Some("k1".to_string()),
        body: PostMessageRequest { content: "hi".to_string() },
    };
    let reply = direct_transport().post(&request).await.unwrap();
    assert_eq!(reply.status, 200);

    let raw = captured.await.unwrap().to_ascii_lowercase();
    assert!(raw.starts_with("post /messages http/1.1\r\n"), "got {raw:?}");
    for (name, value) in request.headers() {
        let line = format!("\r\n{name}: {}\r\n", value.to_ascii_lowercase());
        assert!(raw.contains(&line), "missing {line:?} in {raw:?}");
    }
    assert!(raw.ends_with(r#"{"content":"hi"}"#), "got {raw:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = FormConfig { base_url: format!("http://{addr}"), ..FormConfig::default() };
    let mut submitter = Submitter::new(SimEnv::new(), config, direct_transport());
    submitter.set_content("hello").unwrap();
    submitter.submit().await.unwrap();

    let status = submitter.form().status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Network error: "), "got {:?}", status.text);
    assert!(submitter.form().inputs_enabled());
    assert_eq!(submitter.form().content(), "hello");
}

#[tokio::test]
async fn scripted_replies_drive_successive_submissions() {
    let transport = ScriptedTransport::new()
        .then_reply(500, "Internal server error: disk")
        .then_reply(200, "{}");
    let mut submitter = Submitter::new(SimEnv::new(), FormConfig::default(), transport);

    submitter.set_content("first try").unwrap();
    submitter.submit().await.unwrap();
    assert_eq!(submitter.form().status().unwrap().text, "Error: Internal server error: disk");
    assert_eq!(submitter.form().content(), "first try");

    submitter.submit().await.unwrap();
    assert_eq!(submitter.form().status().unwrap().text, SUCCESS_TEXT);

    assert_eq!(submitter.transport().sent().len(), 2);
    assert_eq!(submitter.transport().remaining(), 0);
}
