//! Local-time wire format helpers.
//!
//! Artifacts carry timestamps as `YYYY-MM-DDTHH:MM:SS` strings with
//! second precision and local-time semantics. The strings are part of the
//! digested JSON, so parsing and formatting must stay byte-stable.

use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};

/// The timestamp layout used inside artifacts.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a wire-format timestamp.
pub fn parse(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, WIRE_FORMAT)
        .map_err(|e| Error::InvalidTimestamp(format!("{value:?}: {e}")))
}

/// Formats a timestamp in the wire layout.
#[must_use]
pub fn format(value: NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// Returns the current local wall-clock time at second precision.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Returns the local UTC offset as a `+HH:MM` style string.
#[must_use]
pub fn local_utc_offset() -> String {
    Local::now().offset().to_string()
}
