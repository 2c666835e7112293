//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses keyed by request path and counts requests, so tests
//! can assert both what was saved and whether the network was touched at all.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status line after the protocol, e.g. "200 OK".
    pub status: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Content-Length to advertise; defaults to the real body length.
    /// A larger value simulates a connection dropped mid-body.
    pub declared_len: Option<usize>,
}

impl MockResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status("200 OK", body)
    }

    pub fn with_status(status: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: status.to_string(),
            headers: Vec::new(),
            body: body.into(),
            declared_len: None,
        }
    }

    pub fn redirect(location: &str) -> Self {
        let mut r = Self::with_status("302 Found", b"redirecting".to_vec());
        r.headers.push(("Location".into(), location.into()));
        r
    }

    pub fn truncated(body: impl Into<Vec<u8>>, declared_len: usize) -> Self {
        let mut r = Self::ok(body);
        r.declared_len = Some(declared_len);
        r
    }
}

pub struct MockServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    /// Absolute URL for `path` (which must start with '/').
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. Unknown paths get 404.
/// The server runs until the process exits.
pub fn start(routes: Vec<(&str, MockResponse)>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, MockResponse>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    MockServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

/// A URL on a local port nothing listens on (connection refused).
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/get-pip.py", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, MockResponse>, hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.fetch_add(1, Ordering::SeqCst);

    let not_found = MockResponse::with_status("404 Not Found", b"not found".to_vec());
    let resp = routes.get(&path).unwrap_or(&not_found);
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        resp.status,
        resp.declared_len.unwrap_or(resp.body.len())
    );
    for (k, v) in &resp.headers {
        head.push_str(&format!("{}: {}\r\n", k, v));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&resp.body);
    let _ = stream.flush();
}
