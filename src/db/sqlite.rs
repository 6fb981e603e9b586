use std::path::Path;

use serde_json::{json, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteRow},
    Column, Row, TypeInfo, ValueRef,
};

use crate::models::Record;

/// Connection options for the posts database
///
/// The file is opened read-only and never created; a missing file is a
/// connection failure rather than an empty database.
pub fn connect_options(database_path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(database_path)
        .read_only(true)
        .create_if_missing(false)
}

/// Converts a row of unknown shape into a JSON object keyed by column name
///
/// Later columns win when two share a name. BLOBs become `null`.
pub fn row_to_record(row: &SqliteRow) -> Record {
    row.columns()
        .iter()
        .map(|column| {
            let i = column.ordinal();
            (column.name().to_string(), column_value(row, i))
        })
        .collect()
}

fn column_value(row: &SqliteRow, i: usize) -> Value {
    let Ok(raw) = row.try_get_raw(i) else {
        return Value::Null;
    };
    if raw.is_null() {
        return Value::Null;
    }

    let type_name = raw.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get::<i64, _>(i).map(|v| json!(v)).ok(),
        "REAL" | "NUMERIC" => row.try_get::<f64, _>(i).map(|v| json!(v)).ok(),
        "TEXT" | "DATE" | "TIME" | "DATETIME" => {
            row.try_get::<String, _>(i).map(Value::String).ok()
        }
        _ => None,
    }
    .unwrap_or(Value::Null)
}
