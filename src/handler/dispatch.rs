//! Request dispatch module
//!
//! Adapts one HTTP request into at most one handler call and one response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;

use super::registry::{HandlerError, Handlers};
use crate::http;
use crate::nfc::{query_command, Command, Params};

/// Called with the command and error whenever a handler fails.
///
/// The client only ever sees an empty 500; this is the only place the error
/// detail is available.
pub type ErrorObserver = Arc<dyn Fn(&Command, &HandlerError) + Send + Sync>;

/// Serves NFC requests by dispatching on the `cmd` query parameter
#[derive(Clone)]
pub struct ServeMux {
    handlers: Arc<Handlers>,
    on_error: Option<ErrorObserver>,
}

impl ServeMux {
    pub const fn new(handlers: Arc<Handlers>) -> Self {
        Self {
            handlers,
            on_error: None,
        }
    }

    #[must_use]
    pub fn with_error_observer(mut self, observer: ErrorObserver) -> Self {
        self.on_error = Some(observer);
        self
    }

    /// The registry this mux dispatches to
    pub const fn handlers(&self) -> &Arc<Handlers> {
        &self.handlers
    }

    /// Dispatch an HTTP request. Only the query string is consulted.
    pub fn handle<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        self.serve_query(req.uri().query())
    }

    /// Dispatch a raw query string (without the leading `?`)
    ///
    /// - No handler for `cmd`: 404, empty body
    /// - Handler fails: 500, empty body
    /// - Otherwise: 200 with the handler payload
    pub fn serve_query(&self, query: Option<&str>) -> Response<Full<Bytes>> {
        let command = query_command(query);
        let Some(handler) = self.handlers.get(&command) else {
            return http::build_empty_response(StatusCode::NOT_FOUND);
        };

        match handler(Params::from_query(query)) {
            Ok(payload) => http::build_payload_response(payload),
            Err(err) => {
                if let Some(observer) = &self.on_error {
                    observer(&command, &err);
                }
                http::build_empty_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl std::fmt::Debug for ServeMux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServeMux")
            .field("handlers", &self.handlers)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
