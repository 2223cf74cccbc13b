//! Dynamically typed query result values.

use chrono::{DateTime, Utc};

/// A single column value from a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// BOOLEAN
    Bool(bool),
    /// Any integer type, widened to i64
    Int(i64),
    /// Any floating-point or decimal type, widened to f64
    Float(f64),
    /// VARCHAR / TEXT
    Text(String),
    /// TIMESTAMP, normalized to UTC
    Timestamp(DateTime<Utc>),
}

/// A single query result row.
pub type Row = Vec<Value>;

impl Value {
    /// Integer value, if this is an integer column.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float value; integer columns are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// String slice, if this is a text column.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean column.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Timestamp value, if this is a timestamp column.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// True if this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
