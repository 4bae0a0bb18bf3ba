//! Canned-response HTTP server for adapter tests.
//!
//! Answers every request with the same status line and body, closes the
//! connection, and counts how many requests arrived.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct StubServer {
  base_url: String,
  hits: Arc<AtomicUsize>,
}

impl StubServer {
  /// Bind to an ephemeral local port and serve `status` (e.g. `"201 Created"`).
  pub async fn start(status: &'static str, body: &'static str) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    tokio::spawn(async move {
      while let Ok((mut socket, _)) = listener.accept().await {
        read_request(&mut socket).await;
        counter.fetch_add(1, Ordering::SeqCst);

        let response = format!(
          "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
          body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
      }
    });

    Self {
      base_url: format!("http://{addr}"),
      hits,
    }
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url)
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Requests fully received so far.
  pub fn hits(&self) -> usize {
    self.hits.load(Ordering::SeqCst)
  }
}

/// Read headers plus a `Content-Length` body.
async fn read_request(socket: &mut TcpStream) {
  let mut buf = Vec::new();
  let mut chunk = [0u8; 4096];

  loop {
    let Ok(n) = socket.read(&mut chunk).await else {
      return;
    };
    if n == 0 {
      return;
    }
    buf.extend_from_slice(&chunk[..n]);

    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
      continue;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
      .lines()
      .find_map(|line| line.strip_prefix("content-length:"))
      .and_then(|v| v.trim().parse::<usize>().ok())
      .unwrap_or(0);

    if buf.len() >= header_end + 4 + content_length {
      return;
    }
  }
}
