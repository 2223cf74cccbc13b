//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use crate::value::{Row, Value};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::types::TimeUnit;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock_conn(&self) -> DbResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock_conn()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Run a query synchronously, materializing every row
    fn query_sync(&self, sql: &str) -> DbResult<Vec<Row>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let mut rows = stmt.query([]).map_err(DbError::from)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(DbError::from)? {
            let column_count = row.as_ref().column_count();
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let raw: duckdb::types::Value =
                    row.get(i).map_err(|e| DbError::ExecutionError(e.to_string()))?;
                values.push(convert_value(raw)?);
            }
            out.push(values);
        }
        Ok(out)
    }

    /// Check if relation exists synchronously
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock_conn()?;

        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };

        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            schema, table
        );

        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(count > 0)
    }
}

/// Widen a DuckDB value into the backend-independent `Value`.
fn convert_value(raw: duckdb::types::Value) -> DbResult<Value> {
    use duckdb::types::Value as Dv;

    Ok(match raw {
        Dv::Null => Value::Null,
        Dv::Boolean(b) => Value::Bool(b),
        Dv::TinyInt(v) => Value::Int(v as i64),
        Dv::SmallInt(v) => Value::Int(v as i64),
        Dv::Int(v) => Value::Int(v as i64),
        Dv::BigInt(v) => Value::Int(v),
        Dv::HugeInt(v) => Value::Int(v as i64),
        Dv::UTinyInt(v) => Value::Int(v as i64),
        Dv::USmallInt(v) => Value::Int(v as i64),
        Dv::UInt(v) => Value::Int(v as i64),
        Dv::UBigInt(v) => Value::Int(v as i64),
        Dv::Float(v) => Value::Float(v as f64),
        Dv::Double(v) => Value::Float(v),
        Dv::Decimal(d) => Value::Float(d.to_string().parse::<f64>().unwrap_or(0.0)),
        Dv::Text(s) => Value::Text(s),
        Dv::Enum(s) => Value::Text(s),
        Dv::Timestamp(unit, amount) => {
            let ts = timestamp_to_utc(unit, amount).ok_or_else(|| {
                DbError::UnsupportedType(format!("out-of-range timestamp {}", amount))
            })?;
            Value::Timestamp(ts)
        }
        Dv::Date32(days) => {
            let ts = DateTime::from_timestamp(days as i64 * 86_400, 0).ok_or_else(|| {
                DbError::UnsupportedType(format!("out-of-range date {}", days))
            })?;
            Value::Timestamp(ts)
        }
        other => {
            return Err(DbError::UnsupportedType(format!("{:?}", other)));
        }
    })
}

fn timestamp_to_utc(unit: TimeUnit, amount: i64) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Second => DateTime::from_timestamp(amount, 0),
        TimeUnit::Millisecond => DateTime::from_timestamp_millis(amount),
        TimeUnit::Microsecond => DateTime::from_timestamp_micros(amount),
        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(amount)),
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query(&self, sql: &str) -> DbResult<Vec<Row>> {
        self.query_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
