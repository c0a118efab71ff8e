//! Integration tests for the HTTP transport's health endpoint.
//!
//! Uses an ephemeral port to avoid conflicts with running instances.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use content_mcp::catalog::{Catalog, SharedCatalog};
use content_mcp::config::{ContentSource, ServerConfig};
use content_mcp::mcp::handler::ContentServer;
use content_mcp::mcp::transport::serve_http;

async fn free_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral");
    listener.local_addr().expect("local addr").port()
}

async fn get(port: u16, path: &str) -> Option<String> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.ok()?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.ok()?;
    let mut response = String::new();
    stream.read_to_string(&mut response).await.ok()?;
    Some(response)
}

#[tokio::test]
async fn health_returns_ok_and_shuts_down_on_cancel() {
    let config = Arc::new(ServerConfig::default());
    let catalog = Catalog::load(&ContentSource::BuiltIn, &config).expect("built-in loads");
    let server = ContentServer::new(SharedCatalog::new(catalog), Arc::clone(&config));

    let port = free_port().await;
    let ct = CancellationToken::new();
    let handle = tokio::spawn(serve_http(server, port, ct.clone()));

    let mut response = None;
    for _ in 0..50 {
        response = get(port, "/health").await;
        if response.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    let response = response.expect("server answered");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("ok"), "{response}");

    ct.cancel();
    let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server stops after cancel")
        .expect("task joins");
    assert!(outcome.is_ok());
}
