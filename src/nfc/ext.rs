//! Path extensions
//!
//! Reader firmware differs in which file extension it appends to the
//! configured root (`/orbit.php`, `/orbit.asp`, ...).

use std::fmt;
use std::str::FromStr;

/// Path extension the reader requests, e.g. `.php`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ext {
    pub id: u8,
    pub name: &'static str,
}

impl Ext {
    pub const PHP: Self = Self { id: 0, name: ".php" };
    pub const ASP: Self = Self { id: 1, name: ".asp" };
    pub const CFM: Self = Self { id: 2, name: ".cfm" };
    pub const PL: Self = Self { id: 3, name: ".pl" };
    pub const HTM: Self = Self { id: 4, name: ".htm" };
    pub const HTML: Self = Self { id: 5, name: ".html" };
    pub const ASPX: Self = Self { id: 6, name: ".aspx" };
    pub const JSP: Self = Self { id: 7, name: ".jsp" };

    /// All extensions supported by the reader, ordered by id
    pub const ALL: [Self; 8] = [
        Self::PHP,
        Self::ASP,
        Self::CFM,
        Self::PL,
        Self::HTM,
        Self::HTML,
        Self::ASPX,
        Self::JSP,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|ext| ext.id == id)
    }
}

impl Default for Ext {
    fn default() -> Self {
        Self::PHP
    }
}

impl fmt::Display for Ext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Returned when parsing an extension the reader does not support
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExtension(pub String);

impl fmt::Display for UnknownExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown path extension: '{}'", self.0)
    }
}

impl std::error::Error for UnknownExtension {}

impl FromStr for Ext {
    type Err = UnknownExtension;

    /// Accepts `php` or `.php`, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
        Self::ALL
            .iter()
            .copied()
            .find(|ext| ext.name[1..].eq_ignore_ascii_case(bare))
            .ok_or_else(|| UnknownExtension(s.to_string()))
    }
}
