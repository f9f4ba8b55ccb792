//! Row decoding
//!
//! Maps PostgreSQL column values to JSON by their declared type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use sqlx::postgres::{PgRow, PgValueFormat, PgValueRef};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::errors::{DbError, DbResult};

/// A result row keyed by declared column names, in declaration order
pub type Record = Map<String, Value>;

/// Decode every column of a row positionally
pub fn decode_row(row: &PgRow) -> DbResult<Vec<Value>> {
    (0..row.len())
        .map(|idx| decode_column(row, idx))
        .collect()
}

/// Zip declared column names with decoded values
pub fn zip_record(columns: &[&str], values: Vec<Value>) -> DbResult<Record> {
    if columns.len() != values.len() {
        return Err(DbError::Query(format!(
            "result row has {} columns, expected {}",
            values.len(),
            columns.len()
        )));
    }
    Ok(columns
        .iter()
        .map(|name| name.to_string())
        .zip(values)
        .collect())
}

fn decode_column(row: &PgRow, idx: usize) -> DbResult<Value> {
    let column = row.column(idx);
    let type_name = column.type_info().name();

    let decoded = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(idx).map(|v| v.map(Value::Bool)),
        "INT2" => row
            .try_get::<Option<i16>, _>(idx)
            .map(|v| v.map(Value::from)),
        "INT4" => row
            .try_get::<Option<i32>, _>(idx)
            .map(|v| v.map(Value::from)),
        "INT8" => row
            .try_get::<Option<i64>, _>(idx)
            .map(|v| v.map(Value::from)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)
            .map(|v| v.map(|n| float_to_json(f64::from(n)))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(idx)
            .map(|v| v.map(float_to_json)),
        "NUMERIC" => {
            let raw = row
                .try_get_raw(idx)
                .map_err(|e| DbError::Query(e.to_string()))?;
            if !raw.is_null() && numeric_is_special(&raw) {
                return Ok(Value::Null);
            }
            row.try_get::<Option<Decimal>, _>(idx)
                .map(|v| v.map(decimal_to_json))
        }
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(idx)
            .map(|v| v.map(Value::String)),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .map(|v| v.map(|d| Value::String(format_date(d)))),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(idx)
            .map(|v| v.map(|t| Value::String(t.to_string()))),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .map(|v| v.map(|ts| Value::String(format_timestamp(ts)))),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)
            .map(|v| v.map(|ts| Value::String(ts.to_rfc3339()))),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(idx),
        other => {
            return Err(DbError::Query(format!(
                "unsupported type {} for column {}",
                other,
                column.name()
            )))
        }
    };

    decoded
        .map(|v| v.unwrap_or(Value::Null))
        .map_err(|e| DbError::Query(e.to_string()))
}

/// NUMERIC as a JSON number with every stored digit
pub fn decimal_to_json(value: Decimal) -> Value {
    let text = value.to_string();
    match text.parse::<Number>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(text),
    }
}

// NaN and the infinities have no Decimal or JSON form.
fn numeric_is_special(value: &PgValueRef<'_>) -> bool {
    match value.format() {
        PgValueFormat::Binary => value.as_bytes().map(numeric_sign_is_special).unwrap_or(false),
        PgValueFormat::Text => value
            .as_str()
            .map(|s| matches!(s, "NaN" | "Infinity" | "-Infinity"))
            .unwrap_or(false),
    }
}

/// Binary NUMERIC header: ndigits, weight, sign, dscale (u16 each)
fn numeric_sign_is_special(bytes: &[u8]) -> bool {
    match bytes.get(4..6) {
        Some(&[hi, lo]) => u16::from_be_bytes([hi, lo]) & 0xC000 == 0xC000,
        _ => false,
    }
}

// JSON has no NaN or infinity.
fn float_to_json(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
