//! # Response Envelope
//!
//! Every API response is wrapped in the same shape:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  { "code": 200, "success": true,  "data": { ... } }          │──► Ok(data)
//! │  { "code": 409, "success": false, "message": "..." }         │──► Err(BusinessError)
//! │  { "success": false }                                        │──► Err("API request failed")
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding never raises notifications itself. Surfacing a failure to the
//! user is the caller's job.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BusinessError;

/// The `{success, data, message}` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,

    pub success: bool,

    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Some server errors carry their text here instead of `message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Builds a successful envelope (mostly useful for tests and fakes).
    pub fn ok(data: T) -> Self {
        Envelope {
            code: Some(200),
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Builds a failed envelope.
    pub fn failure(code: Option<i32>, message: impl Into<String>) -> Self {
        Envelope {
            code,
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Converts a failed envelope into its business error.
    fn into_business_error(self) -> BusinessError {
        BusinessError::new(self.code, self.message.or(self.error))
    }

    /// Returns `data` on success, the business error otherwise.
    ///
    /// A successful envelope whose `data` is absent or `null` decodes to
    /// `T::default()`, so endpoints that return an empty body on success
    /// still decode.
    pub fn into_data(self) -> Result<T, BusinessError>
    where
        T: Default,
    {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(self.into_business_error())
        }
    }

    /// Like [`Envelope::into_data`] but requires `data` to be present.
    ///
    /// A successful envelope without `data` is reported as a business failure.
    pub fn into_required(self) -> Result<T, BusinessError> {
        if !self.success {
            return Err(self.into_business_error());
        }
        let code = self.code;
        self.data.ok_or_else(|| BusinessError::new(code, None))
    }

    /// For mutation endpoints: success discards `data`.
    pub fn into_unit(self) -> Result<(), BusinessError> {
        if self.success {
            Ok(())
        } else {
            Err(self.into_business_error())
        }
    }
}

/// Decodes `value` as a sequence of `T`, yielding an empty vector when the
/// payload is not a JSON array.
///
/// Elements that fail to decode make the whole call fail; a non-array payload
/// is not an error.
pub fn sequence_or_empty<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE_MESSAGE;
    use crate::types::{Page, Product};
    use serde_json::json;

    #[test]
    fn test_success_returns_exactly_data() {
        let env: Envelope<Vec<i32>> =
            serde_json::from_value(json!({"code": 200, "success": true, "data": [1, 2, 3]})).unwrap();
        assert_eq!(env.into_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_carries_message() {
        let env: Envelope<Value> = serde_json::from_value(
            json!({"code": 404, "success": false, "data": null, "message": "Product not found"}),
        )
        .unwrap();
        let err = env.into_unit().unwrap_err();
        assert_eq!(err.message, "Product not found");
        assert_eq!(err.code, Some(404));
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let env: Envelope<Value> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(env.into_unit().unwrap_err().message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_failure_falls_back_to_error_field() {
        let env: Envelope<Value> =
            serde_json::from_value(json!({"success": false, "error": "Bad Request"})).unwrap();
        assert_eq!(env.into_unit().unwrap_err().message, "Bad Request");
    }

    #[test]
    fn test_required_data_missing_is_failure() {
        let env: Envelope<Page<Product>> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(env.into_required().unwrap_err().message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_absent_data_decodes_without_default() {
        let env: Envelope<Page<Product>> =
            serde_json::from_value(json!({"success": true, "code": 200})).unwrap();
        assert_eq!(env.data, None);
        assert_eq!(env.into_required().unwrap_err().message, GENERIC_FAILURE_MESSAGE);

        let env: Envelope<Value> = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(env.into_unit().is_ok());
    }

    #[test]
    fn test_sequence_or_empty() {
        let items: Vec<i64> = sequence_or_empty(json!([4, 5])).unwrap();
        assert_eq!(items, vec![4, 5]);

        let items: Vec<i64> = sequence_or_empty(json!({"list": [4, 5]})).unwrap();
        assert!(items.is_empty());

        let items: Vec<i64> = sequence_or_empty(Value::Null).unwrap();
        assert!(items.is_empty());

        assert!(sequence_or_empty::<i64>(json!(["x"])).is_err());
    }
}
