// Shared helpers: a tiny HTTP responder on 127.0.0.1 and a scripted prober

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use m3uc::core::outcome::ValidationOutcome;
use m3uc::core::playlist::Entry;
use m3uc::core::probe::Prober;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Raw HTTP response with an empty body
pub fn response(status: u16, reason: &str, extra_headers: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n{}\r\n",
        status, reason, extra_headers
    )
}

/// Serve every connection with `respond(method, path)` after `delay`
pub async fn spawn_server(delay: Duration, respond: fn(&str, &str) -> String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => {
                            read += n;
                            let done = buf[..read].windows(4).any(|w| w == b"\r\n\r\n");
                            if done || read == buf.len() {
                                break;
                            }
                        }
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let mut parts = request.split_whitespace();
                let method = parts.next().unwrap_or("").to_string();
                let path = parts.next().unwrap_or("/").to_string();

                tokio::time::sleep(delay).await;
                let _ = socket.write_all(respond(&method, &path).as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// `/live*` is up, `/head-only-broken*` rejects HEAD, everything else is 404
pub fn stream_routes(method: &str, path: &str) -> String {
    if path.starts_with("/live") {
        response(200, "OK", "")
    } else if path.starts_with("/head-only-broken") {
        if method == "HEAD" {
            response(405, "Method Not Allowed", "")
        } else {
            response(200, "OK", "")
        }
    } else if path.starts_with("/moved") {
        response(302, "Found", "Location: /live/after-redirect\r\n")
    } else {
        response(404, "Not Found", "")
    }
}

/// Returns canned outcomes keyed by URL; unknown URLs are working
pub struct ScriptedProber {
    outcomes: HashMap<String, ValidationOutcome>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
        }
    }

    pub fn fail(mut self, url: &str, detail: &str) -> Self {
        self.outcomes.insert(
            url.to_string(),
            ValidationOutcome::failed(detail, None, Duration::from_millis(5)),
        );
        self
    }
}

impl Prober for ScriptedProber {
    async fn probe(&self, entry: &Entry) -> ValidationOutcome {
        self.outcomes
            .get(&entry.url)
            .cloned()
            .unwrap_or_else(|| ValidationOutcome::working(Some(200), Duration::from_millis(5)))
    }
}
