//! Parameters sent by the NFC reader
//!
//! Every field arrives as a query parameter. Values are passed through as
//! strings without interpretation; a missing parameter is an empty string.

use super::Command;

/// Parameters sent by the NFC reader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pub date: String,
    pub time: String,
    pub id: String,
    pub ulen: String,
    pub uid: String,
    /// Raw `cmd` value
    pub command: String,
    pub version: String,
    pub contact1: String,
    pub contact2: String,
    pub sid: String,
    pub data: String,
    pub psrc: String,
    pub md5: String,
    pub mac: String,
    pub relay: String,
    pub sd: String,
}

impl Params {
    /// Build the record from a raw query string (without the leading `?`).
    ///
    /// Keys are matched case-sensitively. When a key repeats, the first value
    /// wins. Unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        let mut seen = [false; 16];
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let (slot, field) = match &*key {
                "date" => (0, &mut params.date),
                "time" => (1, &mut params.time),
                "id" => (2, &mut params.id),
                "ulen" => (3, &mut params.ulen),
                "uid" => (4, &mut params.uid),
                "cmd" => (5, &mut params.command),
                "ver" => (6, &mut params.version),
                "contact1" => (7, &mut params.contact1),
                "contact2" => (8, &mut params.contact2),
                "sid" => (9, &mut params.sid),
                "data" => (10, &mut params.data),
                "psrc" => (11, &mut params.psrc),
                "md5" => (12, &mut params.md5),
                "mac" => (13, &mut params.mac),
                "relay" => (14, &mut params.relay),
                "sd" => (15, &mut params.sd),
                _ => continue,
            };
            if !seen[slot] {
                seen[slot] = true;
                *field = value.into_owned();
            }
        }
        params
    }

    /// The command these parameters were sent with
    pub fn command(&self) -> Command {
        Command::new(self.command.as_str())
    }
}

/// Extract only the `cmd` value from a query string, first occurrence wins
pub(crate) fn query_command(query: Option<&str>) -> Command {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "cmd")
                .map(|(_, value)| Command::new(value.into_owned()))
        })
        .unwrap_or_else(|| Command::new(String::new()))
}
