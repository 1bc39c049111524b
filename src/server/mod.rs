//! Server module
//!
//! `Server::new` wires a `ServeMux` to a single path on a single address.
//! Constructing a server does not bind anything; call `serve` or
//! `listen_and_serve` to start accepting connections.

pub mod connection;
pub mod listener;
pub mod signal;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;
pub use signal::shutdown_signal;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::handler::{ErrorObserver, Handlers, ServeMux};
use crate::http;
use crate::nfc::Ext;

/// Per-connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    pub keep_alive: bool,
    /// Upper bound on the lifetime of one connection; `None` disables it
    pub connection_timeout: Option<Duration>,
    /// Connections beyond this are closed on accept
    pub max_connections: Option<usize>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            keep_alive: true,
            connection_timeout: Some(Duration::from_secs(30)),
            max_connections: None,
        }
    }
}

/// HTTP server for NFC reader requests
#[derive(Debug, Clone)]
pub struct Server {
    addr: SocketAddr,
    path: String,
    mux: ServeMux,
    options: ServerOptions,
}

impl Server {
    /// Build a server answering `{root}{ext}` on `addr`, e.g. `/orbit.php`
    pub fn new(addr: SocketAddr, root: &str, ext: Ext, handlers: Arc<Handlers>) -> Self {
        Self {
            addr,
            path: format!("{root}{ext}"),
            mux: ServeMux::new(handlers),
            options: ServerOptions::default(),
        }
    }

    #[must_use]
    pub fn with_error_observer(mut self, observer: ErrorObserver) -> Self {
        self.mux = self.mux.with_error_observer(observer);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ServerOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The only path this server routes to the mux
    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn mux(&self) -> &ServeMux {
        &self.mux
    }

    pub const fn options(&self) -> &ServerOptions {
        &self.options
    }

    /// Answer one request: the reader path goes to the mux, anything else is 404
    pub fn route<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        if req.uri().path() == self.path {
            self.mux.handle(req)
        } else {
            http::build_404_response()
        }
    }

    /// Serve connections from an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()>,
    {
        start_server_loop(listener, Arc::new(self), shutdown).await
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn listen_and_serve<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let listener = create_reusable_listener(self.addr)?;
        self.serve(listener, shutdown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfc::Command;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn any_addr() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    fn request(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    /// Start `server` on an ephemeral port; dropping the sender stops it
    async fn spawn(server: Server) -> (SocketAddr, oneshot::Sender<()>) {
        let listener = TcpListener::bind(any_addr()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(server.serve(listener, async move {
            let _ = rx.await;
        }));
        (addr, tx)
    }

    /// Send a GET and return (status, body)
    async fn get(addr: SocketAddr, target: &str) -> (u16, Vec<u8>) {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!("GET {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();

        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has no header terminator");
        let head = String::from_utf8_lossy(&raw[..split]).to_string();
        let status = head
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .expect("response has no status code");
        (status, raw[split + 4..].to_vec())
    }

    #[test]
    fn test_path_is_root_plus_ext() {
        let handlers = Arc::new(Handlers::new());
        let server = Server::new(any_addr(), "/orbit", Ext::PHP, Arc::clone(&handlers));
        assert_eq!(server.path(), "/orbit.php");

        let server = Server::new(any_addr(), "/reader/cb", Ext::ASPX, handlers);
        assert_eq!(server.path(), "/reader/cb.aspx");
    }

    #[test]
    fn test_new_does_not_bind() {
        let addr: SocketAddr = "127.0.0.1:1".parse().unwrap();
        let server = Server::new(addr, "/orbit", Ext::PHP, Arc::new(Handlers::new()));
        assert_eq!(server.addr(), addr);
        assert_eq!(server.options(), &ServerOptions::default());
    }

    #[test]
    fn test_route_only_serves_reader_path() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handlers = Arc::new(Handlers::new());
        handlers.set(Command::PING, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"pong"))
        });
        let server = Server::new(any_addr(), "/orbit", Ext::PHP, handlers);

        assert_eq!(server.route(&request("/orbit.php?cmd=PG")).status(), 200);
        assert_eq!(server.route(&request("/orbit.asp?cmd=PG")).status(), 404);
        assert_eq!(server.route(&request("/orbit?cmd=PG")).status(), 404);
        assert_eq!(server.route(&request("/orbit.php/x?cmd=PG")).status(), 404);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ping_returns_pong() {
        let handlers = Arc::new(Handlers::new());
        handlers.set(Command::PING, |_| Ok(Bytes::from_static(b"pong")));
        let (addr, _stop) = spawn(Server::new(any_addr(), "/orbit", Ext::PHP, handlers)).await;

        let (status, body) = get(addr, "/orbit.php?cmd=PG").await;
        assert_eq!(status, 200);
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn test_unregistered_command_is_404() {
        let handlers = Arc::new(Handlers::new());
        let (addr, _stop) = spawn(Server::new(any_addr(), "/orbit", Ext::PHP, handlers)).await;

        let (status, body) = get(addr, "/orbit.php?cmd=CO&uid=ABC123").await;
        assert_eq!(status, 404);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_handler_error_is_500() {
        let handlers = Arc::new(Handlers::new());
        handlers.set(Command::HEARTBEAT, |_| Err("reader unknown".into()));
        let (addr, _stop) = spawn(Server::new(any_addr(), "/orbit", Ext::PHP, handlers)).await;

        let (status, body) = get(addr, "/orbit.php?cmd=HB").await;
        assert_eq!(status, 500);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_other_path_not_dispatched() {
        let handlers = Arc::new(Handlers::new());
        handlers.set(Command::PING, |_| Ok(Bytes::from_static(b"pong")));
        let (addr, _stop) = spawn(Server::new(any_addr(), "/orbit", Ext::JSP, handlers)).await;

        let (status, _) = get(addr, "/orbit.php?cmd=PG").await;
        assert_eq!(status, 404);

        let (status, body) = get(addr, "/orbit.jsp?cmd=PG").await;
        assert_eq!(status, 200);
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn test_registry_changes_while_serving() {
        let handlers = Arc::new(Handlers::new());
        let server = Server::new(any_addr(), "/orbit", Ext::PHP, Arc::clone(&handlers));
        let (addr, _stop) = spawn(server).await;

        assert_eq!(get(addr, "/orbit.php?cmd=SW").await.0, 404);

        handlers.set(Command::LEVEL_CHANGE, |p| Ok(Bytes::from(format!("relay={}", p.relay))));
        let (status, body) = get(addr, "/orbit.php?cmd=SW&relay=1").await;
        assert_eq!(status, 200);
        assert_eq!(body, b"relay=1");

        handlers.del(&Command::LEVEL_CHANGE);
        assert_eq!(get(addr, "/orbit.php?cmd=SW").await.0, 404);
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let listener = TcpListener::bind(any_addr()).await.unwrap();
        let server = Server::new(any_addr(), "/orbit", Ext::PHP, Arc::new(Handlers::new()));
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(server.serve(listener, async move {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server loop did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_listen_and_serve_binds_addr() {
        // Reserve a free port, then release it for the server
        let probe = TcpListener::bind(any_addr()).await.unwrap();
        let addr = probe.local_addr().unwrap();
        drop(probe);

        let handlers = Arc::new(Handlers::new());
        handlers.set(Command::PING, |_| Ok(Bytes::from_static(b"pong")));
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(Server::new(addr, "/orbit", Ext::PHP, handlers).listen_and_serve(async move {
            let _ = rx.await;
        }));

        let mut attempts = 0;
        let (status, body) = loop {
            if TcpStream::connect(addr).await.is_ok() {
                break get(addr, "/orbit.php?cmd=PG").await;
            }
            attempts += 1;
            assert!(attempts < 50, "server never started listening");
            tokio::time::sleep(Duration::from_millis(20)).await;
        };
        assert_eq!(status, 200);
        assert_eq!(body, b"pong");
        drop(tx);
    }
}
