// src/table/mod.rs

//! Report-table tree model: each table is an ordered list of rows, each row a
//! map of scalar columns plus an optional child table. Tables also carry a
//! free-form string metadata map; the sanitizer consults one well-known key.

mod row;

pub use row::{Row, Value};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key under which a table records the archival timestamp of its
/// data. Present (ISO-8601-ish string) for previously archived reports,
/// absent for live-computed ones.
pub const ARCHIVED_DATE_KEY: &str = "archived_date";

/// An ordered collection of report rows plus table-level metadata.
///
/// Row order is meaningful and preserved by every operation in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, preserving insertion order.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}
