// Connection handling module
// Serves a single TCP connection with the server's router

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::Server;
use crate::logger;

/// Accept a connection, enforcing the connection limit.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `server` - The server whose router answers requests
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    server: &Arc<Server>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = server.options().max_connections {
        if prev_count >= max_conn {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    handle_connection(stream, Arc::clone(server), Arc::clone(conn_counter));
}

/// Serve one connection in a spawned task.
///
/// Keep-alive and the connection timeout come from the server options.
/// The active connection counter is decremented when the task ends.
fn handle_connection(
    stream: tokio::net::TcpStream,
    server: Arc<Server>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let options = server.options().clone();

        let mut builder = http1::Builder::new();
        builder.keep_alive(options.keep_alive);

        let service_server = Arc::clone(&server);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let server = Arc::clone(&service_server);
                async move { Ok::<_, Infallible>(server.route(&req)) }
            }),
        );

        let result = match options.connection_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, conn).await {
                Ok(result) => result,
                Err(_) => {
                    logger::log_warning(&format!(
                        "Connection timeout after {} seconds",
                        timeout.as_secs()
                    ));
                    Ok(())
                }
            },
            None => conn.await,
        };
        if let Err(err) = result {
            logger::log_connection_error(&err);
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
