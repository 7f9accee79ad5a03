//! Error types for gateway calls.
//!
//! Every backend operation resolves to the decoded payload or one of these
//! values. Nothing is retried or swallowed; the caller decides what to show.

use thiserror::Error;

/// Coarse classification of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// The request was rejected before it was issued.
    Request,
    /// No response was received (DNS, connect, reset, ...).
    Network,
    /// A response arrived with a non-success status.
    HttpStatus,
    /// A success response whose body did not decode.
    Decode,
}

impl GatewayErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GatewayErrorKind::Request => "request",
            GatewayErrorKind::Network => "network",
            GatewayErrorKind::HttpStatus => "http_status",
            GatewayErrorKind::Decode => "decode",
        }
    }
}

/// A request body or header that does not fit its endpoint definition.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("{operation} takes no request body")]
    UnexpectedBody { operation: &'static str },

    #[error("{operation} requires a request body")]
    MissingBody { operation: &'static str },

    #[error("{operation} body must be a JSON object")]
    NotAnObject { operation: &'static str },

    #[error("{operation} body is missing field '{field}'")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("{operation} body has unexpected field '{field}'")]
    UnknownField {
        operation: &'static str,
        field: String,
    },

    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },

    #[error("{operation} body could not be serialized: {source}")]
    Serialize {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ShapeError {
    /// Operation the rejected request was built for. Header errors carry none.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            ShapeError::UnexpectedBody { operation }
            | ShapeError::MissingBody { operation }
            | ShapeError::NotAnObject { operation }
            | ShapeError::MissingField { operation, .. }
            | ShapeError::UnknownField { operation, .. }
            | ShapeError::Serialize { operation, .. } => Some(*operation),
            ShapeError::InvalidHeader { .. } => None,
        }
    }
}

/// Failure of a gateway call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request construction failed; nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ShapeError),

    /// Transport failed before a response was received.
    #[error("Network error calling {operation}: {source}")]
    Network {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Backend answered 2xx but the body was not the expected JSON.
    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            GatewayError::InvalidRequest(_) => GatewayErrorKind::Request,
            GatewayError::Network { .. } => GatewayErrorKind::Network,
            GatewayError::HttpStatus { .. } => GatewayErrorKind::HttpStatus,
            GatewayError::Decode { .. } => GatewayErrorKind::Decode,
        }
    }

    /// Status code, present only for [`GatewayErrorKind::HttpStatus`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GatewayError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body text, when a response was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            GatewayError::HttpStatus { body, .. } | GatewayError::Decode { body, .. } => {
                Some(body.as_str())
            }
            _ => None,
        }
    }

    /// Operation the failed call belonged to, if it got that far.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            GatewayError::InvalidRequest(err) => err.operation(),
            GatewayError::Network { operation, .. }
            | GatewayError::HttpStatus { operation, .. }
            | GatewayError::Decode { operation, .. } => Some(*operation),
        }
    }

    /// JSON diagnostic suitable for printing or forwarding to a UI.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "kind": self.kind().as_str(),
                "operation": self.operation(),
                "status_code": self.status_code(),
                "message": self.to_string(),
                "raw_body": self.raw_body(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_embeds_status_and_body() {
        let err = GatewayError::HttpStatus {
            operation: "predict",
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: maintenance");
        assert_eq!(err.kind(), GatewayErrorKind::HttpStatus);
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.raw_body(), Some("maintenance"));
    }

    #[test]
    fn test_shape_error_has_no_status() {
        let err = GatewayError::from(ShapeError::MissingBody {
            operation: "contact-support",
        });
        assert_eq!(err.kind(), GatewayErrorKind::Request);
        assert_eq!(err.status_code(), None);
        assert_eq!(err.raw_body(), None);
        assert_eq!(err.operation(), Some("contact-support"));
        assert_eq!(err.to_json()["error"]["operation"], "contact-support");
    }

    #[test]
    fn test_invalid_header_has_no_operation() {
        let err = GatewayError::from(ShapeError::InvalidHeader {
            name: "bad header".to_string(),
        });
        assert_eq!(err.kind(), GatewayErrorKind::Request);
        assert_eq!(err.operation(), None);
        assert!(err.to_json()["error"]["operation"].is_null());
    }

    #[test]
    fn test_error_json_format() {
        let err = GatewayError::HttpStatus {
            operation: "health",
            status: 500,
            body: "server error".to_string(),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["kind"], "http_status");
        assert_eq!(json["error"]["status_code"], 500);
        assert_eq!(json["error"]["raw_body"], "server error");
        assert_eq!(json["error"]["operation"], "health");
    }
}
