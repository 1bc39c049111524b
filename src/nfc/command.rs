//! NFC command codes

use std::borrow::Cow;
use std::fmt;

/// Command code sent by the reader in the `cmd` query parameter.
///
/// Any string is a valid command, so integrators can bind codes the
/// well-known constants below don't cover.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(Cow<'static, str>);

impl Command {
    /// Power up
    pub const POWER_UP: Self = Self(Cow::Borrowed("PU"));
    /// Heartbeat
    pub const HEARTBEAT: Self = Self(Cow::Borrowed("HB"));
    /// Card operation
    pub const CARD_OPERATION: Self = Self(Cow::Borrowed("CO"));
    /// Level change
    pub const LEVEL_CHANGE: Self = Self(Cow::Borrowed("SW"));
    /// Ping
    pub const PING: Self = Self(Cow::Borrowed("PG"));

    /// Create a command from an arbitrary code
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Command {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Command {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}
