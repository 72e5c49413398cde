//! Safe decoding of report labels.
//!
//! Labels arrive from tracking requests and are stored in archived report
//! tables. Archives written before the urldecode cutover
//! ([`policy::DATE_OF_URLDECODE_CHANGE`]) hold them percent-encoded, newer
//! archives hold them decoded. [`LabelSanitizer`] walks a table tree,
//! reverses the legacy encoding where the archive stamp calls for it, and
//! normalizes every label to exactly one layer of HTML escaping over
//! `& < > " '` so downstream rendering can embed it verbatim.

pub mod entities;
pub mod percent;
pub mod policy;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::table::{Table, Value, ARCHIVED_DATE_KEY};

/// Column rewritten by [`LabelSanitizer::new`].
pub const LABEL_COLUMN: &str = "label";

/// In-place sanitizer for the label column of a report table tree.
///
/// The urldecode decision is table-scoped: each table, subtables included,
/// is judged by its own `archived_date` metadata, never by an ancestor's.
/// Rows whose label column is absent or carries the `false` marker are left
/// alone, and their subtables are not descended into.
#[derive(Debug, Clone)]
pub struct LabelSanitizer {
    column: String,
    cutover: NaiveDate,
    recursive: bool,
}

impl LabelSanitizer {
    /// Sanitizer over the standard `label` column with the production
    /// cutover day.
    pub fn new() -> Self {
        Self::for_column(LABEL_COLUMN)
    }

    /// Sanitizer over a differently named text column.
    pub fn for_column(column: impl Into<String>) -> Self {
        LabelSanitizer {
            column: column.into(),
            cutover: *policy::URLDECODE_CUTOVER,
            recursive: true,
        }
    }

    /// Replace the cutover day used for the urldecode decision.
    pub fn with_cutover(mut self, cutover: NaiveDate) -> Self {
        self.cutover = cutover;
        self
    }

    /// Toggle descent into row subtables. On by default.
    pub fn enable_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Whether `table`'s archive stamp predates the cutover, meaning its
    /// labels still carry collection-time percent-encoding.
    pub fn should_url_decode(&self, table: &Table) -> Result<bool> {
        policy::should_url_decode_value(table.metadata_value(ARCHIVED_DATE_KEY), self.cutover)
    }

    /// Rewrite the label column of every row in `table` and, unless
    /// recursion is disabled, of every descendant subtable. Row order,
    /// row count and all other columns are preserved.
    ///
    /// Subtable depth is attacker-controlled in imported reports, so the
    /// walk uses an explicit work stack instead of call recursion. Fails
    /// on the first malformed archive stamp or non-text label.
    #[tracing::instrument(level = "debug", skip(self, table), fields(column = %self.column, rows = table.row_count()))]
    pub fn filter(&self, table: &mut Table) -> Result<()> {
        let mut stack: Vec<&mut Table> = vec![table];
        let mut tables = 0usize;
        let mut labels = 0usize;

        while let Some(current) = stack.pop() {
            let url_decode = self
                .should_url_decode(current)
                .context("deriving urldecode policy from table metadata")?;
            tables += 1;

            for row in current.rows_mut() {
                let value = match row.column(&self.column) {
                    // No label means nothing to sanitize; the row's
                    // subtable is skipped with it.
                    None | Some(Value::Bool(false)) => continue,
                    Some(value) => value,
                };
                let cleaned = decode_label_safe(value, url_decode)?;
                row.set_column(self.column.clone(), cleaned);
                labels += 1;

                if self.recursive {
                    if let Some(sub) = row.subtable_mut() {
                        stack.push(sub);
                    }
                }
            }
        }

        debug!(tables, labels, "label sanitization complete");
        Ok(())
    }
}

impl Default for LabelSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize a single label value.
///
/// Empty-like values (empty or `"0"` text, numeric zero, `false`) pass
/// through untouched. Text runs through [`decode_text`]. Any other value is
/// an error: upstream report computation only ever writes text into the
/// label column, so a stray number here means corrupted input.
pub fn decode_label_safe(value: &Value, url_decode: bool) -> Result<Value> {
    if value.is_empty() {
        return Ok(value.clone());
    }
    match value {
        Value::Text(text) => Ok(Value::Text(decode_text(text, url_decode))),
        other => bail!("label column holds non-text value: {:?}", other),
    }
}

/// The decode pipeline for label text.
///
/// With `url_decode` set, the collection-time percent-encoding is reversed
/// first (`+` reads as space, malformed `%` sequences stay literal) and any
/// byte sequences that are not valid UTF-8 afterwards are dropped. Both
/// paths then decode HTML entities for the five special characters and
/// re-escape, so pre-escaped and literal input converge on the same singly
/// escaped form.
pub fn decode_text(text: &str, url_decode: bool) -> String {
    if url_decode {
        // 1) reverse the collection-time encoding, '+' included
        let bytes = percent::form_urldecode(text);
        // 2) the decoded bytes may no longer form valid UTF-8
        let recovered = percent::discard_invalid_utf8(&bytes);
        // 3) normalize to a single escape layer
        entities::encode_entities(&entities::decode_entities(&recovered))
    } else {
        entities::encode_entities(&entities::decode_entities(text))
    }
}
