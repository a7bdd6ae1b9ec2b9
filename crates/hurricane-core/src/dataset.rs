// File: crates/hurricane-core/src/dataset.rs
// Summary: Unified in-memory table (row-aligned named columns) produced by the loader.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::error::Error;

/// A single cell. Ordered and hashable so values can key category counts.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the cell; `None` for null, NaN and non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Null and NaN both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Integer(_) => 2,
            Value::Float(_) => 3,
            Value::Text(_) => 4,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "<null>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Integer(i) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Float(v) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

/// What a column holds, judged from its non-missing cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Bool,
    Text,
    /// Zero rows, or every cell missing.
    Empty,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Bool => "bool",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self { name: name.into(), values }
    }

    /// Convenience for building a column from anything convertible to [`Value`].
    pub fn from_values<T: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn values(&self) -> &[Value] { &self.values }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Mixed columns report the widest kind present (Text over Bool over Numeric).
    pub fn kind(&self) -> ColumnKind {
        let mut kind = ColumnKind::Empty;
        for v in &self.values {
            let k = match v {
                Value::Null => continue,
                Value::Float(f) if f.is_nan() => continue,
                Value::Integer(_) | Value::Float(_) => ColumnKind::Numeric,
                Value::Bool(_) => ColumnKind::Bool,
                Value::Text(_) => return ColumnKind::Text,
            };
            kind = match (kind, k) {
                (ColumnKind::Empty, k) => k,
                (ColumnKind::Numeric, ColumnKind::Bool) | (ColumnKind::Bool, ColumnKind::Numeric) => ColumnKind::Text,
                (cur, _) => cur,
            };
            if kind == ColumnKind::Text {
                return kind;
            }
        }
        kind
    }
}

/// A named axis a gridded dataset was flattened over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
}

/// Where the rows came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Delimited text or in-memory rows.
    Table,
    /// An array container flattened row-major over `dims`.
    Grid { dims: Vec<Dimension> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' has {len} rows, expected {expected}")]
    RaggedColumn { column: String, len: usize, expected: usize },
}

impl From<DatasetError> for Error {
    fn from(e: DatasetError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

/// Named, equal-length columns. Read-only once built.
#[derive(Clone, Debug)]
pub struct Dataset {
    layout: Layout,
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset, enforcing unique names and row alignment.
    pub fn from_columns(layout: Layout, columns: Vec<Column>) -> Result<Self, DatasetError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                return Err(DatasetError::DuplicateColumn(c.name.clone()));
            }
            if c.len() != rows {
                return Err(DatasetError::RaggedColumn { column: c.name.clone(), len: c.len(), expected: rows });
            }
        }
        Ok(Self { layout, columns, rows })
    }

    /// Shorthand for an in-memory [`Layout::Table`].
    pub fn table(columns: Vec<Column>) -> Result<Self, DatasetError> {
        Self::from_columns(Layout::Table, columns)
    }

    pub fn layout(&self) -> &Layout { &self.layout }
    pub fn columns(&self) -> &[Column] { &self.columns }
    pub fn len(&self) -> usize { self.rows }
    pub fn is_empty(&self) -> bool { self.rows == 0 }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Dataset::get`] but reports the miss as [`Error::ColumnNotFound`].
    pub fn column(&self, name: &str) -> Result<&Column, Error> {
        self.get(name).ok_or_else(|| Error::ColumnNotFound {
            column: name.to_string(),
            available: self.column_names(),
        })
    }
}
