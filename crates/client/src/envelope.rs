//! The `{code, msg, data}` wrapper around every backend response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            msg: "success".into(),
            data: Some(data),
        }
    }

    /// `0` and the `2xx` range mean success; anything else is a failure.
    pub fn is_success(&self) -> bool {
        is_success_code(self.code)
    }

    /// Payload of a successful envelope (possibly absent for `void`
    /// endpoints), or [`ClientError::Api`].
    pub fn into_result(self) -> Result<Option<T>, ClientError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ClientError::Api {
                code: self.code,
                msg: self.msg,
            })
        }
    }
}

pub fn is_success_code(code: i32) -> bool {
    code == 0 || (200..300).contains(&code)
}

/// Decode a raw JSON body as an envelope and unwrap its data.
///
/// A missing or `null` `data` is an error here; use [`decode_unit`] for
/// endpoints that return nothing.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    let envelope: Envelope<Value> = serde_json::from_value(body)?;
    match envelope.into_result()? {
        Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
        // `()`-like and `Option<_>` targets accept null.
        _ => Ok(serde_json::from_value(Value::Null)?),
    }
}

/// Decode an envelope whose payload is irrelevant.
pub fn decode_unit(body: Value) -> Result<(), ClientError> {
    let envelope: Envelope<Value> = serde_json::from_value(body)?;
    envelope.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn zero_and_2xx_are_success() {
        assert!(is_success_code(0));
        assert!(is_success_code(200));
        assert!(!is_success_code(500));
        assert!(!is_success_code(1));
    }

    #[test]
    fn decodes_payload() {
        let n: i64 = decode(json!({"code": 0, "msg": "ok", "data": 42})).unwrap();
        assert_eq!(n, 42);
    }

    #[test]
    fn failure_code_becomes_api_error() {
        let err = decode::<i64>(json!({"code": 10001, "msg": "Username already exists"}))
            .unwrap_err();
        assert_matches!(err, ClientError::Api { code: 10001, ref msg } if msg == "Username already exists");
    }

    #[test]
    fn null_data_allowed_for_optional_targets() {
        let v: Option<i64> = decode(json!({"code": 200, "msg": "ok", "data": null})).unwrap();
        assert_eq!(v, None);
        assert!(decode::<i64>(json!({"code": 0, "msg": "ok"})).is_err());
        decode_unit(json!({"code": 0, "msg": "ok"})).unwrap();
    }
}
