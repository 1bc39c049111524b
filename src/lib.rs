//! HTTP callback server for NFC readers.
//!
//! Readers report events as GET requests to a fixed path such as
//! `/orbit.php`, with the command code in the `cmd` query parameter. A
//! [`Server`] routes that path to a [`ServeMux`], which looks the command up
//! in a [`Handlers`] registry and writes back whatever the handler returns.
//!
//! ```no_run
//! use orbitip::{Bytes, Command, Ext, Handlers, Server, DEFAULT_ROOT};
//! use std::sync::Arc;
//!
//! # async fn run() -> std::io::Result<()> {
//! let handlers = Arc::new(Handlers::new());
//! handlers.set(Command::PING, |_| Ok(Bytes::from_static(b"pong")));
//!
//! let addr = "0.0.0.0:8080".parse().unwrap();
//! Server::new(addr, DEFAULT_ROOT, Ext::PHP, handlers)
//!     .listen_and_serve(orbitip::server::shutdown_signal())
//!     .await
//! # }
//! ```

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod nfc;
pub mod server;

pub use handler::{ErrorObserver, HandlerError, HandlerFn, HandlerResult, Handlers, ServeMux};
pub use hyper::body::Bytes;
pub use nfc::{Command, Ext, Params, DEFAULT_EXT, DEFAULT_ROOT};
pub use server::{Server, ServerOptions};
