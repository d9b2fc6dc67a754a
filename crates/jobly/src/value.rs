//! Dynamic values bound to generated placeholders.
//!
//! Update and filter bags carry loosely typed input (typically decoded from a
//! JSON body or a query string). [`Value`] keeps that input as-is and adapts
//! to the column type Postgres infers for each placeholder when the statement
//! is executed.

use bytes::BytesMut;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use tokio_postgres::types::{IsNull, ToSql, Type};

type BoxError = Box<dyn Error + Sync + Send>;

/// A single bound value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric form of this value, parsing text when needed.
    ///
    /// Integers stay integers; text that parses as `i64` becomes [`Value::Int`],
    /// other finite numeric text becomes [`Value::Float`]. Returns `None` for
    /// null, booleans, and text that is not a finite number.
    pub fn to_number(&self) -> Option<Value> {
        match self {
            Value::Int(n) => Some(Value::Int(*n)),
            Value::Float(f) if f.is_finite() => Some(Value::Float(*f)),
            Value::Text(s) => {
                let s = s.trim();
                if let Ok(n) = s.parse::<i64>() {
                    return Some(Value::Int(n));
                }
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::Float)
            }
            _ => None,
        }
    }

    /// Numeric form as `f64`, for comparing bounds.
    pub fn as_f64(&self) -> Option<f64> {
        match self.to_number()? {
            Value::Int(n) => Some(n as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

fn is_text(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN
    )
}

fn mismatch(kind: &str, ty: &Type) -> BoxError {
    format!("cannot bind {kind} value to column of type {ty}").into()
}

fn encode_int(n: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(n)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(n)?.to_sql(ty, out),
        Type::INT8 => n.to_sql(ty, out),
        Type::FLOAT4 => (n as f32).to_sql(ty, out),
        Type::FLOAT8 => (n as f64).to_sql(ty, out),
        Type::NUMERIC => Decimal::from(n).to_sql(ty, out),
        _ if is_text(ty) => n.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch("integer", ty)),
    }
}

fn encode_float(x: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 | Type::INT4 | Type::INT8 => {
            if x.fract() != 0.0 || !x.is_finite() {
                return Err(format!("{x} is not a whole number (column type {ty})").into());
            }
            encode_int(x as i64, ty, out)
        }
        Type::FLOAT4 => (x as f32).to_sql(ty, out),
        Type::FLOAT8 => x.to_sql(ty, out),
        Type::NUMERIC => Decimal::try_from(x)?.to_sql(ty, out),
        _ if is_text(ty) => x.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch("float", ty)),
    }
}

fn encode_text(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::BOOL => s.trim().parse::<bool>()?.to_sql(ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 => encode_int(s.trim().parse::<i64>()?, ty, out),
        Type::FLOAT4 | Type::FLOAT8 => encode_float(s.trim().parse::<f64>()?, ty, out),
        Type::NUMERIC => Decimal::from_str(s.trim())?.to_sql(ty, out),
        _ if is_text(ty) => s.to_sql(ty, out),
        _ => Err(mismatch("text", ty)),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => match *ty {
                Type::BOOL => b.to_sql(ty, out),
                _ if is_text(ty) => b.to_string().as_str().to_sql(ty, out),
                _ => Err(mismatch("boolean", ty)),
            },
            Value::Int(n) => encode_int(*n, ty, out),
            Value::Float(x) => encode_float(*x, ty, out),
            Value::Text(s) => encode_text(s, ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::NUMERIC
        ) || is_text(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}
