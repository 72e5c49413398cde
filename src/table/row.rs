// src/table/row.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Table;

/// A single scalar cell of a report row.
///
/// Report producers emit mixed scalars; serde reads them untagged so JSON
/// fixtures and upstream payloads map directly (`true` → `Bool`, `3` → `Int`,
/// `3.5` → `Float`, `"x"` → `Text`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Emptiness rule inherited from the upstream reporting stack: `""`,
    /// `"0"`, `0`, `0.0` and `false` all count as empty. `Bool(false)`
    /// doubles as the placeholder for a column that is not present.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Text(s) => s.is_empty() || s == "0",
        }
    }

    /// Borrow the textual content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One row of a report table: named columns plus at most one nested
/// sub-table. Ownership is strictly parent-to-child, so the row tree is
/// acyclic by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    columns: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtable: Option<Box<Table>>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) a column.
    pub fn set_column(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(name.into(), value.into());
    }

    pub fn column(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.columns.get_mut(name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Attach a child table, replacing any existing one.
    pub fn set_subtable(&mut self, table: Table) {
        self.subtable = Some(Box::new(table));
    }

    pub fn subtable(&self) -> Option<&Table> {
        self.subtable.as_deref()
    }

    pub fn subtable_mut(&mut self) -> Option<&mut Table> {
        self.subtable.as_deref_mut()
    }

    /// Detach and return the child table, if any.
    pub fn take_subtable(&mut self) -> Option<Table> {
        self.subtable.take().map(|boxed| *boxed)
    }
}
