// JSON-to-table normalization.
// Projects API records onto a declared column list and converts date columns to UTC timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{ForumError, Result};

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Nested arrays and objects are kept as-is.
    Json(Value),
}

impl Cell {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Json(other.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

/// Declared shape of a table: ordered required columns, and which of them hold dates.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub columns: &'static [&'static str],
    pub date_columns: &'static [&'static str],
}

impl Schema {
    pub const fn new(columns: &'static [&'static str], date_columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            date_columns,
        }
    }

    pub fn is_date(&self, column: &str) -> bool {
        self.date_columns.contains(&column)
    }
}

/// Row-major table with named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row { table: self, index })
    }

    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }

    /// Convert every row into a typed record.
    pub fn records<T: FromRow>(&self) -> Result<Vec<T>> {
        self.iter().map(|row| T::from_row(&row)).collect()
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        let col = self.table.column_index(column)?;
        self.table.rows[self.index].get(col)
    }

    pub fn cells(&self) -> &'a [Cell] {
        &self.table.rows[self.index]
    }

    fn require(&self, column: &str) -> Result<&'a Cell> {
        self.get(column)
            .ok_or_else(|| ForumError::missing_column(column, self.index))
    }

    pub fn i64(&self, column: &str) -> Result<i64> {
        self.require(column)?
            .as_i64()
            .ok_or_else(|| ForumError::wrong_type(column, self.index, "integer"))
    }

    pub fn u64(&self, column: &str) -> Result<u64> {
        let value = self.i64(column)?;
        u64::try_from(value).map_err(|_| ForumError::wrong_type(column, self.index, "unsigned integer"))
    }

    /// Unsigned integer that may be null.
    pub fn opt_u64(&self, column: &str) -> Result<Option<u64>> {
        if self.require(column)?.is_null() {
            return Ok(None);
        }
        self.u64(column).map(Some)
    }

    pub fn bool(&self, column: &str) -> Result<bool> {
        self.require(column)?
            .as_bool()
            .ok_or_else(|| ForumError::wrong_type(column, self.index, "boolean"))
    }

    pub fn text(&self, column: &str) -> Result<&'a str> {
        self.require(column)?
            .as_str()
            .ok_or_else(|| ForumError::wrong_type(column, self.index, "string"))
    }

    /// Text that may be null.
    pub fn opt_text(&self, column: &str) -> Result<Option<&'a str>> {
        let cell = self.require(column)?;
        if cell.is_null() {
            return Ok(None);
        }
        self.text(column).map(Some)
    }

    pub fn timestamp(&self, column: &str) -> Result<DateTime<Utc>> {
        self.require(column)?
            .as_timestamp()
            .ok_or_else(|| ForumError::wrong_type(column, self.index, "timestamp"))
    }

    /// Timestamp that may be null.
    pub fn opt_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>> {
        if self.require(column)?.is_null() {
            return Ok(None);
        }
        self.timestamp(column).map(Some)
    }
}

/// Records that can be built from a normalized row.
pub trait FromRow: Sized {
    const SCHEMA: Schema;

    fn from_row(row: &Row<'_>) -> Result<Self>;
}

/// Build a table from JSON records, one row per record, columns in schema order.
///
/// Fields not named by the schema are dropped. Every declared column must be present
/// in every record; date columns must hold a parsable timestamp string or null.
pub fn normalize(records: &[Value], schema: &Schema) -> Result<Table> {
    let columns: Vec<String> = schema.columns.iter().map(|c| c.to_string()).collect();
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let object = record
            .as_object()
            .ok_or_else(|| ForumError::wrong_type("<record>", index, "object"))?;

        let mut row = Vec::with_capacity(columns.len());
        for &column in schema.columns {
            let value = object
                .get(column)
                .ok_or_else(|| ForumError::missing_column(column, index))?;

            let cell = if schema.is_date(column) {
                date_cell(column, value)?
            } else {
                Cell::from_json(value)
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Table { columns, rows })
}

fn date_cell(column: &str, value: &Value) -> Result<Cell> {
    let invalid = || ForumError::Parse {
        column: column.to_string(),
        value: value.to_string(),
    };
    match value {
        Value::Null => Ok(Cell::Null),
        Value::String(s) => parse_timestamp(s).map(Cell::Timestamp).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Parse an ISO-8601 timestamp. A trailing `Z` or explicit offset is honored;
/// values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|n| n.and_utc())
}
