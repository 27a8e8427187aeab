//! Stored Value Module
//!
//! Scalar values the cache can hold, their wire encoding and the built-in decoders.

use std::fmt;

use crate::error::{CacheError, Result};

// == Stored Value ==
/// A scalar written to the store under a generated key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

/// Tag of a [`StoredValue`] variant, used to pick a decoder on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Bytes,
    Integer,
    Float,
}

impl StoredValue {
    /// Returns the variant tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            StoredValue::Text(_) => ValueKind::Text,
            StoredValue::Bytes(_) => ValueKind::Bytes,
            StoredValue::Integer(_) => ValueKind::Integer,
            StoredValue::Float(_) => ValueKind::Float,
        }
    }

    // == Encode ==
    /// Encodes the value the way the store keeps it.
    ///
    /// Text and bytes are written verbatim, integers in base 10 and floats in
    /// their shortest decimal form that parses back to the same value.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            StoredValue::Float(f) => f.to_string().into_bytes(),
        }
    }

    // == Decode ==
    /// Decodes raw store bytes as the given kind.
    pub fn decode(key: &str, kind: ValueKind, raw: Vec<u8>) -> Result<Self> {
        match kind {
            ValueKind::Text => decode_text(key, raw).map(StoredValue::Text),
            ValueKind::Bytes => decode_bytes(key, raw).map(StoredValue::Bytes),
            ValueKind::Integer => decode_integer(key, raw).map(StoredValue::Integer),
            ValueKind::Float => decode_float(key, raw).map(StoredValue::Float),
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Text(text) => f.write_str(text),
            StoredValue::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            StoredValue::Integer(n) => write!(f, "{n}"),
            StoredValue::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(i64::from(value))
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Built-in Decoders ==
/// Interprets raw bytes as UTF-8 text.
pub fn decode_text(key: &str, raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| decode_error(key, e))
}

/// Parses raw bytes as a base-10 signed integer.
pub fn decode_integer(key: &str, raw: Vec<u8>) -> Result<i64> {
    let text = std::str::from_utf8(&raw).map_err(|e| decode_error(key, e))?;
    text.trim().parse().map_err(|e| decode_error(key, e))
}

/// Parses raw bytes as a 64-bit float.
pub fn decode_float(key: &str, raw: Vec<u8>) -> Result<f64> {
    let text = std::str::from_utf8(&raw).map_err(|e| decode_error(key, e))?;
    text.trim().parse().map_err(|e| decode_error(key, e))
}

/// Returns the raw bytes unchanged.
pub fn decode_bytes(_key: &str, raw: Vec<u8>) -> Result<Vec<u8>> {
    Ok(raw)
}

fn decode_error(key: &str, reason: impl ToString) -> CacheError {
    CacheError::Decode {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
