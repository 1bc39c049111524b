//! NFC reader vocabulary
//!
//! Types describing what an NFC reader sends to the server:
//! - Command codes (`cmd` query parameter)
//! - Path extensions expected by different reader firmware
//! - The flat parameter record passed to handlers

mod command;
mod ext;
mod params;

pub use command::Command;
pub use ext::{Ext, UnknownExtension};
pub use params::Params;
pub(crate) use params::query_command;

/// Default path root the reader sends requests to (`/orbit.php`)
pub const DEFAULT_ROOT: &str = "/orbit";

/// Default path extension
pub const DEFAULT_EXT: Ext = Ext::PHP;
