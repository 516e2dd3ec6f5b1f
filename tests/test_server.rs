//! End-to-end tests against a live listener

use docroot::config::Config;
use docroot::server::Server;
use std::collections::HashSet;
use std::fs;
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    _shutdown: oneshot::Sender<()>,
    _root: TempDir,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn spawn_server(max_request_bytes: usize) -> TestServer {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("a.html"), "<html>a</html>").unwrap();
    fs::write(root.path().join("b.png"), b"\x89PNG\r\n\x1a\n").unwrap();

    let mut cfg = Config::default();
    cfg.server.listen_addr = "127.0.0.1:0".to_string();
    cfg.server.max_request_bytes = max_request_bytes;
    cfg.static_files.root = root.path().to_path_buf();

    let server = Server::start(&cfg).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async move {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        handle,
        _shutdown: shutdown,
        _root: root,
    }
}

async fn exchange(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    // The server closes the connection after its single response
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_get_root_lists_directory() {
    let server = spawn_server(64 * 1024).await;

    let response = exchange(server.addr, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let head = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n";
    assert!(response.starts_with(head));

    let body = String::from_utf8(response[head.len()..].to_vec()).unwrap();
    let entries: HashSet<&str> = body.split("\r\n").collect();
    assert_eq!(entries, HashSet::from(["a.html", "b.png"]));
}

#[tokio::test]
async fn test_get_file() {
    let server = spawn_server(64 * 1024).await;

    let response = exchange(server.addr, b"GET /a.html HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html>a</html>".to_vec()
    );
}

#[tokio::test]
async fn test_get_missing_file() {
    let server = spawn_server(64 * 1024).await;

    let response = exchange(server.addr, b"GET /missing.txt HTTP/1.1\r\n\r\n").await;

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n".to_vec());
}

#[tokio::test]
async fn test_post_not_allowed() {
    let server = spawn_server(64 * 1024).await;

    let response = exchange(server.addr, b"POST /a.html HTTP/1.1\r\n\r\n").await;

    assert_eq!(response, b"HTTP/1.1 405 Method Not Allowed\r\n".to_vec());
}

#[tokio::test]
async fn test_same_request_twice_is_identical() {
    let server = spawn_server(64 * 1024).await;
    let request = b"GET /b.png HTTP/1.1\r\n\r\n";

    let first = exchange(server.addr, request).await;
    let second = exchange(server.addr, request).await;

    assert_eq!(first, second);
    assert!(first.ends_with(b"\x89PNG\r\n\x1a\n"));
}

#[tokio::test]
async fn test_request_split_across_writes() {
    let server = spawn_server(64 * 1024).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(b"GET /a.ht").await.unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    stream.write_all(b"ml HTTP/1.1\r\n\r\n").await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    assert!(response.ends_with(b"<html>a</html>"));
}

#[tokio::test]
async fn test_request_without_terminator_answered_after_half_close() {
    let server = spawn_server(64 * 1024).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(b"GET /missing HTTP/1.1\r\n").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n".to_vec());
}

#[tokio::test]
async fn test_empty_request_gets_no_response() {
    let server = spawn_server(64 * 1024).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    assert!(response.is_empty());

    // The accept loop keeps going
    let response = exchange(server.addr, b"GET /a.html HTTP/1.1\r\n\r\n").await;
    assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_oversized_request_is_dropped_and_server_survives() {
    let server = spawn_server(128).await;

    let mut request = b"GET / HTTP/1.1\r\nX-Padding: ".to_vec();
    request.extend(std::iter::repeat_n(b'a', 1024));

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    // The server may reset the connection before every byte is written
    let _ = stream.write_all(&request).await;

    let mut response = Vec::new();
    let _ = stream.read_to_end(&mut response).await;
    assert!(response.is_empty());

    let response = exchange(server.addr, b"GET /missing HTTP/1.1\r\n\r\n").await;
    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n".to_vec());
}

#[tokio::test]
async fn test_start_rejects_unresolvable_address() {
    let mut cfg = Config::default();
    cfg.server.listen_addr = "not an address".to_string();

    assert!(Server::start(&cfg).await.is_err());
}

#[tokio::test]
async fn test_stop_releases_listener() {
    let mut cfg = Config::default();
    cfg.server.listen_addr = "127.0.0.1:0".to_string();

    let server = Server::start(&cfg).await.unwrap();
    let addr = server.local_addr().unwrap();
    server.stop();

    cfg.server.listen_addr = addr.to_string();
    let again = Server::start(&cfg).await.unwrap();
    assert_eq!(again.local_addr().unwrap(), addr);
}

#[tokio::test]
async fn test_run_until_stops_on_shutdown_and_releases_listener() {
    let mut cfg = Config::default();
    cfg.server.listen_addr = "127.0.0.1:0".to_string();

    let server = Server::start(&cfg).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async move {
        let _ = rx.await;
    }));

    tx.send(()).unwrap();
    handle.await.unwrap();

    cfg.server.listen_addr = addr.to_string();
    let again = Server::start(&cfg).await.unwrap();
    assert_eq!(again.local_addr().unwrap(), addr);
}
