//! Success/failure envelope returned to callers.

use serde::Serialize;

/// An error that carries a stable, machine-readable code.
///
/// Codes are upper snake case (`INVALID_INPUT`) and are part of the wire
/// contract, so they must not change once published.
pub trait ErrorCode: std::fmt::Display {
    /// Returns the code for this error.
    fn code(&self) -> &'static str;
}

/// Tagged result envelope.
///
/// Serializes as `{"success": true, "data": ...}` on success and as
/// `{"success": false, "error": "...", "code": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceResponse<T> {
    Success {
        success: bool,
        data: T,
    },
    Failure {
        success: bool,
        error: String,
        code: &'static str,
    },
}

impl<T> ServiceResponse<T> {
    /// Wraps a successful value.
    pub fn success(data: T) -> Self {
        ServiceResponse::Success {
            success: true,
            data,
        }
    }

    /// Wraps an error, keeping its message and code.
    pub fn failure<E: ErrorCode>(err: &E) -> Self {
        ServiceResponse::Failure {
            success: false,
            error: err.to_string(),
            code: err.code(),
        }
    }

    /// Returns true for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResponse::Success { .. })
    }

    /// Returns the payload if this is a success.
    pub fn data(&self) -> Option<&T> {
        match self {
            ServiceResponse::Success { data, .. } => Some(data),
            ServiceResponse::Failure { .. } => None,
        }
    }

    /// Returns the error code if this is a failure.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ServiceResponse::Success { .. } => None,
            ServiceResponse::Failure { code, .. } => Some(code),
        }
    }
}

impl<T, E: ErrorCode> From<Result<T, E>> for ServiceResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ServiceResponse::success(data),
            Err(err) => ServiceResponse::failure(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Rejected;

    impl std::fmt::Display for Rejected {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "rejected")
        }
    }

    impl ErrorCode for Rejected {
        fn code(&self) -> &'static str {
            "REJECTED"
        }
    }

    #[test]
    fn test_success_envelope_shape() {
        let response: ServiceResponse<u32> = Ok::<u32, Rejected>(7).into();
        assert!(response.is_success());
        assert_eq!(response.data(), Some(&7));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": 7 }));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let response: ServiceResponse<u32> = Err(Rejected).into();
        assert!(!response.is_success());
        assert_eq!(response.code(), Some("REJECTED"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "rejected", "code": "REJECTED" })
        );
    }
}
