// src/sanitize/policy.rs

//! Decides, from a table's `archived_date` metadata, whether its labels
//! were stored percent-encoded and still need a url-decode pass.

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use tracing::trace;

/// Archives produced strictly before this day stored labels
/// percent-encoded; archives from this day onward store them decoded.
pub const DATE_OF_URLDECODE_CHANGE: &str = "2018-09-25";

/// [`DATE_OF_URLDECODE_CHANGE`] parsed once for comparisons.
pub static URLDECODE_CUTOVER: Lazy<NaiveDate> = Lazy::new(|| {
    NaiveDate::parse_from_str(DATE_OF_URLDECODE_CHANGE, "%Y-%m-%d")
        .expect("cutover date literal is well-formed")
});

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an `archived_date` stamp. Accepts the archive writer's
/// `YYYY-MM-DD HH:MM:SS` form, its `T`-separated variant (with optional
/// fractional seconds), and a bare `YYYY-MM-DD`, which reads as midnight.
pub fn parse_archived_date(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(parsed.and_time(NaiveTime::MIN));
    }
    bail!("unrecognized archived_date value: {:?}", raw)
}

/// Whether labels under an archive stamped `archived_date` still carry
/// percent-encoding. Absent metadata and the placeholder stamps `""` and
/// `"0"` mean a modern archive, so no url-decode. A present stamp that does
/// not parse is an error; silently guessing either way would corrupt labels.
pub fn should_url_decode_value(archived_date: Option<&str>, cutover: NaiveDate) -> Result<bool> {
    let raw = match archived_date {
        Some(raw) => raw,
        None => return Ok(false),
    };
    if raw.is_empty() || raw == "0" {
        return Ok(false);
    }
    let archived = parse_archived_date(raw)?;
    let decode = archived.date() < cutover;
    trace!(archived = %archived, %cutover, decode, "derived urldecode policy");
    Ok(decode)
}
