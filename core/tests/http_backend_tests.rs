//! `HttpBackend` against a one-shot local HTTP server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use equiviz_core::*;

/// A request as the server saw it.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accept one connection, answer it with `status` and `body`, and hand back
/// what the client sent.
fn serve_once(status: &'static str, body: Vec<u8>) -> (ApiConfig, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = ApiConfig::new(&format!("http://127.0.0.1:{}/api", port)).unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let raw = read_request(&mut stream);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();

        parse_request(&raw)
    });

    (config, handle)
}

fn read_request(stream: &mut impl Read) -> Vec<u8> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
        if request_complete(&raw) {
            break;
        }
    }
    raw
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(split) = text.find("\r\n\r\n") else {
        return false;
    };
    let head = text[..split].to_ascii_lowercase();
    let body_len = raw.len() - (split + 4);
    if let Some(line) = head.lines().find(|l| l.starts_with("content-length:")) {
        let expected: usize = line["content-length:".len()..].trim().parse().unwrap();
        return body_len >= expected;
    }
    if head.contains("transfer-encoding: chunked") {
        return text.ends_with("0\r\n\r\n");
    }
    true
}

fn parse_request(raw: &[u8]) -> Captured {
    let text = String::from_utf8_lossy(raw).into_owned();
    let (head, body) = text.split_once("\r\n\r\n").unwrap();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap().to_string();
    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();
    Captured {
        request_line,
        headers,
        body: body.to_string(),
    }
}

#[tokio::test]
async fn test_login_posts_json_without_authorization() {
    let (config, server) = serve_once("200 OK", br#"{"token": "abc123"}"#.to_vec());
    let backend = HttpBackend::new(config);

    let resp = backend
        .authenticate(AuthMode::Login, &Credentials::new("alice", "x"))
        .await
        .unwrap();
    assert_eq!(resp.token.as_deref(), Some("abc123"));

    let req = server.join().unwrap();
    assert_eq!(req.request_line, "POST /api/auth/login/ HTTP/1.1");
    assert_eq!(req.header("authorization"), None);
    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, serde_json::json!({"username": "alice", "password": "x"}));
}

#[tokio::test]
async fn test_register_sends_email() {
    let (config, server) = serve_once("201 Created", br#"{"token": "t"}"#.to_vec());
    let backend = HttpBackend::new(config);

    let creds = Credentials::new("bob", "pw").with_email("bob@example.com");
    backend.authenticate(AuthMode::Register, &creds).await.unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.request_line, "POST /api/auth/register/ HTTP/1.1");
    assert_eq!(req.header("authorization"), None);
    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent["email"], "bob@example.com");
}

#[tokio::test]
async fn test_upload_sends_file_part_with_token() {
    let (config, server) = serve_once(
        "201 Created",
        include_bytes!("fixtures/dataset_detail.json").to_vec(),
    );
    let backend = HttpBackend::new(config);

    let file = UploadFile::new("a.csv", b"Equipment Name,Type\nP-1,Pump\n".to_vec());
    let detail = backend.upload_dataset("abc", &file).await.unwrap();
    assert_eq!(detail.id, 7);

    let req = server.join().unwrap();
    assert_eq!(req.request_line, "POST /api/datasets/upload/ HTTP/1.1");
    assert_eq!(req.header("authorization"), Some("Token abc"));
    assert!(req
        .header("content-type")
        .is_some_and(|v| v.starts_with("multipart/form-data")));
    assert!(req.body.contains(r#"name="file"; filename="a.csv""#));
    assert!(req.body.contains("text/csv"));
    assert!(req.body.contains("P-1,Pump"));
}

#[tokio::test]
async fn test_list_uses_token() {
    let (config, server) = serve_once("200 OK", include_bytes!("fixtures/datasets.json").to_vec());
    let backend = HttpBackend::new(config);

    let datasets = backend.list_datasets("abc").await.unwrap();
    assert_eq!(datasets.iter().map(|d| d.id).collect::<Vec<_>>(), vec![7, 4]);

    let req = server.join().unwrap();
    assert_eq!(req.request_line, "GET /api/datasets/ HTTP/1.1");
    assert_eq!(req.header("authorization"), Some("Token abc"));
}

#[tokio::test]
async fn test_summary_path() {
    let (config, server) = serve_once("200 OK", include_bytes!("fixtures/dataset_detail.json").to_vec());
    let backend = HttpBackend::new(config);

    backend.dataset_summary("abc", 7).await.unwrap();

    let req = server.join().unwrap();
    assert_eq!(req.request_line, "GET /api/datasets/7/summary/ HTTP/1.1");
    assert_eq!(req.header("authorization"), Some("Token abc"));
}

#[tokio::test]
async fn test_pdf_returns_raw_bytes() {
    let (config, server) = serve_once("200 OK", b"%PDF-1.4 fake".to_vec());
    let backend = HttpBackend::new(config);

    let bytes = backend.generate_pdf("abc", 7).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.4 fake");

    let req = server.join().unwrap();
    assert_eq!(req.request_line, "GET /api/datasets/7/generate_pdf/ HTTP/1.1");
    assert_eq!(req.header("authorization"), Some("Token abc"));
}

#[tokio::test]
async fn test_error_body_becomes_server_error() {
    let (config, server) = serve_once("400 Bad Request", br#"{"error": "Invalid credentials"}"#.to_vec());
    let backend = HttpBackend::new(config);

    let err = backend
        .authenticate(AuthMode::Login, &Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::Server("Invalid credentials".to_string()));
    server.join().unwrap();
}

#[tokio::test]
async fn test_unreadable_auth_reply_is_missing_token() {
    let (config, server) = serve_once("200 OK", Vec::new());
    let backend = HttpBackend::new(config);

    let err = backend
        .authenticate(AuthMode::Login, &Credentials::new("alice", "x"))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::MissingToken);
    server.join().unwrap();
}

#[tokio::test]
async fn test_login_with_empty_reply_shows_no_token_received() {
    let (config, server) = serve_once("200 OK", b"<html>ok</html>".to_vec());
    let tokens = MemoryTokenStore::new();
    let controller = Controller::new(HttpBackend::new(config), tokens.clone(), SharedState::default());

    let result = controller
        .authenticate(AuthMode::Login, Credentials::new("alice", "x"))
        .await;
    server.join().unwrap();

    assert_eq!(result, Err(ClientError::MissingToken));
    let state = controller.snapshot();
    assert_eq!(state.error.as_deref(), Some("No token received"));
    assert!(!state.authenticated);
    assert_eq!(tokens.current(), None);
}
