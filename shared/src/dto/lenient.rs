//! Forgiving deserializers for numeric fields.
//!
//! The adapter boundary is not trusted to return one exact numeric encoding.
//! Use with `#[serde(default, deserialize_with = "...")]`.

use lib_utils::numeric::{coerce_bool, coerce_i64, coerce_u128, coerce_u64};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value))
}

pub fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_i64(&value))
}

pub fn de_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value))
}

/// Token amounts in base units: written as decimal strings, read leniently.
pub mod amount {
    use super::*;

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_u128(&value))
    }
}
