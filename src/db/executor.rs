//! Query Executor
//!
//! Runs a generated SQL string on a fresh MySQL connection and converts the
//! rows into JSON records. Any failure, including failing to connect, is
//! logged and turned into the `None` sentinel; error detail never leaves
//! this module.

use crate::config::DatabaseConfig;
use crate::db::connection::connect;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::mysql::{MySql, MySqlRow};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::{Column, Connection, Decode, Executor, Row, Type, TypeInfo, ValueRef};
use tracing::{debug, error, info, warn};

/// One result row: column name → value, in the database's column order
pub type Record = Map<String, Value>;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Rows in database order, or `None` if the query could not be run
    async fn execute(&self, sql: &str) -> Option<Vec<Record>>;
}

pub struct MySqlExecutor {
    config: DatabaseConfig,
}

impl MySqlExecutor {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    async fn run(&self, sql: &str) -> Result<Vec<Record>> {
        let mut conn = connect(&self.config).await?;
        // No bind arguments, so MySQL runs it over the text protocol
        let result = Executor::fetch_all(&mut conn, sql).await;

        // Released on every path, including a failed statement
        if let Err(e) = conn.close().await {
            warn!("Failed to close MySQL connection cleanly: {}", e);
        }

        let rows = result?;
        Ok(rows.iter().map(row_to_record).collect())
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    async fn execute(&self, sql: &str) -> Option<Vec<Record>> {
        match self.run(sql).await {
            Ok(records) => {
                info!("🗄️ Query returned {} rows", records.len());
                Some(records)
            }
            Err(e) => {
                error!("[SQL EXECUTION ERROR] {}", e);
                None
            }
        }
    }
}

pub fn row_to_record(row: &MySqlRow) -> Record {
    let mut record = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        record.insert(column.name().to_string(), column_value(row, idx));
    }
    record
}

fn decode<'r, T>(row: &'r MySqlRow, idx: usize) -> Option<T>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get::<T, _>(idx).ok()
}

fn decimal_value(value: BigDecimal) -> Value {
    let text = value.to_string();
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::String(text))
}

/// How a MySQL column type is turned into JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Bool,
    Signed,
    Unsigned,
    Year,
    Float,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Time,
    Text,
}

fn value_kind(type_name: &str) -> ValueKind {
    match type_name {
        "BOOLEAN" => ValueKind::Bool,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ValueKind::Signed,
        "YEAR" => ValueKind::Year,
        name if name.ends_with("UNSIGNED") => ValueKind::Unsigned,
        "FLOAT" | "DOUBLE" => ValueKind::Float,
        "DECIMAL" => ValueKind::Decimal,
        "DATE" => ValueKind::Date,
        "DATETIME" => ValueKind::DateTime,
        "TIMESTAMP" => ValueKind::Timestamp,
        "TIME" => ValueKind::Time,
        _ => ValueKind::Text,
    }
}

fn column_value(row: &MySqlRow, idx: usize) -> Value {
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(e) => {
            debug!("Column {} unreadable: {}", idx, e);
            return Value::Null;
        }
    }

    let type_name = row.column(idx).type_info().name();

    let typed = match value_kind(type_name) {
        ValueKind::Bool => decode::<bool>(row, idx).map(Value::Bool),
        ValueKind::Signed => decode::<i64>(row, idx).map(Value::from),
        ValueKind::Unsigned => decode::<u64>(row, idx).map(Value::from),
        ValueKind::Year => decode::<u16>(row, idx).map(Value::from),
        ValueKind::Float => decode::<f64>(row, idx).map(Value::from),
        ValueKind::Decimal => decode::<BigDecimal>(row, idx).map(decimal_value),
        ValueKind::Date => decode::<NaiveDate>(row, idx).map(|d| Value::String(d.to_string())),
        ValueKind::DateTime => decode::<NaiveDateTime>(row, idx).map(|d| Value::String(d.to_string())),
        ValueKind::Timestamp => decode::<DateTime<Utc>>(row, idx).map(|d| Value::String(d.to_rfc3339())),
        ValueKind::Time => decode::<NaiveTime>(row, idx).map(|t| Value::String(t.to_string())),
        ValueKind::Text => decode::<String>(row, idx).map(Value::String),
    };

    typed
        .or_else(|| decode::<i64>(row, idx).map(Value::from))
        .or_else(|| decode::<u64>(row, idx).map(Value::from))
        .or_else(|| decode::<f64>(row, idx).map(Value::from))
        .or_else(|| decode::<String>(row, idx).map(Value::String))
        .or_else(|| {
            decode::<Vec<u8>>(row, idx).map(|bytes| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        })
        .unwrap_or_else(|| {
            warn!("Unsupported column type {} at index {}, returning null", type_name, idx);
            Value::Null
        })
}
