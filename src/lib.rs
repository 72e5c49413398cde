// src/lib.rs

//! labelscrub rewrites the label column of archived report tables into
//! HTML-safe, singly escaped UTF-8 text.
//!
//! Report labels were percent-encoded at collection time until the
//! urldecode cutover and stored decoded afterwards. The sanitizer reads
//! each table's `archived_date` metadata to decide whether the legacy
//! decoding still applies, then normalizes whatever escaping the label
//! already carries into one canonical layer. See [`LabelSanitizer`] for
//! the entry point and [`sanitize::policy`] for the cutover rules.

pub mod sanitize;
pub mod table;

pub use sanitize::{decode_label_safe, decode_text, LabelSanitizer, LABEL_COLUMN};
pub use table::{Row, Table, Value, ARCHIVED_DATE_KEY};
