//! Wire DTOs for the lab backend.
//!
//! Field names follow the backend's camelCase JSON. Optional fields
//! default to `None` when absent so older backend builds that omit
//! columns still decode.

pub mod achievement;
pub mod author;
pub mod category;
pub mod dict;
pub mod news;
pub mod public;
pub mod user;

pub(crate) mod lenient {
    //! Deserializers for fields the backend emits as either numbers or
    //! numeric strings.

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn number_from(value: Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn opt_i32<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i32>, D::Error> {
        let value = Option::<Value>::deserialize(de)?;
        Ok(value.and_then(number_from).map(|n| n as i32))
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(de)?;
        Ok(value.and_then(number_from))
    }

    /// Strings that sometimes arrive as bare numbers (phone, student id).
    pub fn opt_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(de)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }
}
