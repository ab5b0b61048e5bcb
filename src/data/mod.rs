//! Wire and model types exchanged with the geocoding and prediction services

pub mod alert;
pub mod geocoding;
pub mod prediction;

use serde::{Deserialize, Deserializer};

/// Status flag as sent by the backend: `true`/`false` or `1`/`0`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
        Flag::Float(value) => value != 0.0,
    })
}
