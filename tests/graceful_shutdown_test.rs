//! Integration tests for graceful shutdown of the HTTP server
//!
//! These tests verify that:
//! - The server answers over a real socket
//! - A shutdown signal stops the server
//! - Multiple receivers observe the same signal

use carebook::adapters::store::InMemoryStore;
use carebook::api::{build_app, serve};
use carebook::config::ServerConfig;
use carebook::core::records::PatientService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

async fn start() -> (
    SocketAddr,
    watch::Sender<bool>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let service = Arc::new(PatientService::new(Arc::new(InMemoryStore::new())));
    let app = build_app(service, &ServerConfig::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(serve(listener, app, rx));
    (addr, tx, handle)
}

async fn get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_server_answers_then_stops_on_signal() {
    let (addr, tx, handle) = start().await;

    let response = get(addr, "/healthz").await;
    assert!(response.starts_with("HTTP/1.1 200"), "response: {response}");
    assert!(response.contains(r#"{"status":"ok"}"#));

    tx.send(true).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_server_keeps_running_without_signal() {
    let (addr, tx, handle) = start().await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!handle.is_finished());
    assert!(get(addr, "/").await.starts_with("HTTP/1.1 200"));

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_shutdown_signal_propagation() {
    let (shutdown_tx, shutdown_rx1) = watch::channel(false);
    let shutdown_rx2 = shutdown_rx1.clone();

    assert!(!*shutdown_rx1.borrow());
    assert!(!*shutdown_rx2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx1.borrow());
    assert!(*shutdown_rx2.borrow());
}
