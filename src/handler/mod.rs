//! Command handler module
//!
//! Maps NFC commands to integrator-supplied handlers and dispatches
//! requests to them.

pub mod dispatch;
pub mod registry;

pub use dispatch::{ErrorObserver, ServeMux};
pub use registry::{HandlerError, HandlerFn, HandlerResult, Handlers};
