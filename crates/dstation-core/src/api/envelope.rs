//! Response envelope: `{success: true, data}` or `{success: false, error: {code}}`.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Decoded response. A failure is data, not an `Err`; callers branch on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(ApiError),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// Converts into a `Result`, keeping the vendor error as the `Err` arm.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(err) => Err(err),
        }
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    error: Option<ApiError>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::deserialize(deserializer)?;
        if raw.success {
            // Bare `{"success": true}` decodes `data` from null.
            T::deserialize(raw.data)
                .map(Envelope::Success)
                .map_err(D::Error::custom)
        } else {
            raw.error
                .map(Envelope::Failure)
                .ok_or_else(|| D::Error::missing_field("error"))
        }
    }
}

/// Vendor error body. Only `code` is contractual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub code: i64,
}

/// Which API's code table to consult when describing an error.
/// Codes 400+ mean different things per API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    Common,
    Auth,
    Task,
}

impl ApiError {
    pub fn describe(&self, scope: ErrorScope) -> String {
        let common = match self.code {
            100 => Some("unknown error"),
            101 => Some("invalid parameter"),
            102 => Some("the requested API does not exist"),
            103 => Some("the requested method does not exist"),
            104 => Some("the requested version does not support the functionality"),
            105 => Some("the logged in session does not have permission"),
            106 => Some("session timeout"),
            107 => Some("session interrupted by duplicate login"),
            _ => None,
        };
        if let Some(msg) = common {
            return msg.to_string();
        }
        let scoped = match (scope, self.code) {
            (ErrorScope::Auth, 400) => Some("no such account or incorrect password"),
            (ErrorScope::Auth, 401) => Some("account disabled"),
            (ErrorScope::Auth, 402) => Some("permission denied"),
            (ErrorScope::Auth, 403) => Some("2-step verification code required"),
            (ErrorScope::Auth, 404) => Some("failed to authenticate 2-step verification code"),
            (ErrorScope::Task, 400) => Some("file upload failed"),
            (ErrorScope::Task, 401) => Some("max number of tasks reached"),
            (ErrorScope::Task, 402) => Some("destination denied"),
            (ErrorScope::Task, 403) => Some("destination does not exist"),
            (ErrorScope::Task, 404) => Some("invalid task id"),
            (ErrorScope::Task, 405) => Some("invalid task action"),
            (ErrorScope::Task, 406) => Some("no default destination"),
            (ErrorScope::Task, 407) => Some("set destination failed"),
            (ErrorScope::Task, 408) => Some("file does not exist"),
            _ => None,
        };
        match scoped {
            Some(msg) => msg.to_string(),
            None => format!("unknown error code {}", self.code),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.code, self.describe(ErrorScope::Common))
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_passes_data_through() {
        let data = json!({"tasks": [{"id": "dbid_1"}], "total": 1});
        let body = json!({"success": true, "data": data.clone()});
        let env: Envelope<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(env, Envelope::Success(data));
    }

    #[test]
    fn failure_passes_code_through() {
        let body = json!({"success": false, "error": {"code": 119}});
        let env: Envelope<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(env, Envelope::Failure(ApiError { code: 119 }));
        assert!(!env.is_success());
    }

    #[test]
    fn success_without_data_decodes_unit() {
        let env: Envelope<()> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.is_success());
    }

    #[test]
    fn failure_without_error_body_is_rejected() {
        let r: Result<Envelope<()>, _> = serde_json::from_str(r#"{"success":false}"#);
        assert!(r.is_err());
    }

    #[test]
    fn missing_tag_is_rejected() {
        let r: Result<Envelope<serde_json::Value>, _> = serde_json::from_str(r#"{"data":1}"#);
        assert!(r.is_err());
    }

    #[test]
    fn typed_data_mismatch_is_rejected() {
        #[derive(Debug, Deserialize)]
        struct Sid {
            #[allow(dead_code)]
            sid: String,
        }
        let r: Result<Envelope<Sid>, _> = serde_json::from_str(r#"{"success":true,"data":{}}"#);
        assert!(r.is_err());
    }

    #[test]
    fn describe_uses_scope_for_4xx_codes() {
        let e = ApiError { code: 400 };
        assert_eq!(e.describe(ErrorScope::Auth), "no such account or incorrect password");
        assert_eq!(e.describe(ErrorScope::Task), "file upload failed");
        assert_eq!(e.describe(ErrorScope::Common), "unknown error code 400");
        assert_eq!(ApiError { code: 106 }.describe(ErrorScope::Task), "session timeout");
    }

    #[test]
    fn into_result_maps_arms() {
        assert_eq!(Envelope::Success(3).into_result(), Ok(3));
        assert_eq!(
            Envelope::<i32>::Failure(ApiError { code: 105 }).into_result(),
            Err(ApiError { code: 105 })
        );
    }
}
