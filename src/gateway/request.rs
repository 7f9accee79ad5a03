//! Request descriptors validated against the endpoint catalog.

use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use super::catalog::{Endpoint, HttpMethod, PayloadShape};
use super::error::ShapeError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully-built backend request.
///
/// Construction checks the body against the endpoint's [`PayloadShape`], so a
/// descriptor that exists is always one the catalog allows. Fields are read-only
/// once built; headers can only be layered on before the descriptor is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    endpoint: Endpoint,
    body: Option<Value>,
    headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Build a descriptor for `endpoint` carrying `body`.
    pub fn new(endpoint: Endpoint, body: Option<Value>) -> Result<Self, ShapeError> {
        validate_body(endpoint, body.as_ref())?;
        Ok(Self {
            endpoint,
            body,
            headers: vec![(CONTENT_TYPE.as_str().to_string(), JSON_CONTENT_TYPE.to_string())],
        })
    }

    /// Build a descriptor whose body is the JSON encoding of `payload`.
    pub fn with_payload<T: Serialize + ?Sized>(
        endpoint: Endpoint,
        payload: &T,
    ) -> Result<Self, ShapeError> {
        let body = serde_json::to_value(payload).map_err(|source| ShapeError::Serialize {
            operation: endpoint.name(),
            source,
        })?;
        Self::new(endpoint, Some(body))
    }

    /// Add a caller-supplied header.
    ///
    /// Header names compare case-insensitively; a caller header replaces any
    /// existing header of the same name, including the default `Content-Type`.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ShapeError> {
        if HeaderName::from_bytes(name.as_bytes()).is_err()
            || HeaderValue::from_str(value).is_err()
        {
            return Err(ShapeError::InvalidHeader {
                name: name.to_string(),
            });
        }
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        Ok(self)
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn operation(&self) -> &'static str {
        self.endpoint.name()
    }

    pub fn method(&self) -> HttpMethod {
        self.endpoint.definition().method
    }

    pub fn path_suffix(&self) -> &'static str {
        self.endpoint.definition().path_suffix
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialized JSON body, if any.
    pub fn encoded_body(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }
}

fn validate_body(endpoint: Endpoint, body: Option<&Value>) -> Result<(), ShapeError> {
    let operation = endpoint.name();
    match (endpoint.definition().request, body) {
        (PayloadShape::Empty, None) => Ok(()),
        (PayloadShape::Empty, Some(_)) => Err(ShapeError::UnexpectedBody { operation }),
        (PayloadShape::Any, Some(_)) => Ok(()),
        (PayloadShape::Any, None) | (PayloadShape::Fields(_), None) => {
            Err(ShapeError::MissingBody { operation })
        }
        (PayloadShape::Fields(fields), Some(value)) => {
            let object = value
                .as_object()
                .ok_or(ShapeError::NotAnObject { operation })?;
            if let Some(field) = fields.iter().find(|f| !object.contains_key(**f)) {
                return Err(ShapeError::MissingField {
                    operation,
                    field: *field,
                });
            }
            let unknown = object
                .keys()
                .find(|k| !fields.iter().any(|f| *f == k.as_str()));
            if let Some(extra) = unknown {
                return Err(ShapeError::UnknownField {
                    operation,
                    field: extra.clone(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_content_type() {
        let req = RequestDescriptor::new(Endpoint::Health, None).unwrap();
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.path_suffix(), "/health");
        assert!(req.encoded_body().is_none());
    }

    #[test]
    fn test_caller_header_overrides_default() {
        let req = RequestDescriptor::new(Endpoint::Health, None)
            .unwrap()
            .with_header("content-type", "application/vnd.marketdesk+json")
            .unwrap()
            .with_header("X-Trace", "abc")
            .unwrap();
        assert_eq!(req.headers().len(), 2);
        assert_eq!(
            req.header("Content-Type"),
            Some("application/vnd.marketdesk+json")
        );
        assert_eq!(req.header("x-trace"), Some("abc"));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = RequestDescriptor::new(Endpoint::Health, None)
            .unwrap()
            .with_header("bad header", "x")
            .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidHeader { .. }));
    }

    #[test]
    fn test_get_endpoint_rejects_body() {
        let err = RequestDescriptor::new(Endpoint::GetPersonalization, Some(json!({})))
            .unwrap_err();
        assert!(matches!(err, ShapeError::UnexpectedBody { .. }));
    }

    #[test]
    fn test_fields_must_match_exactly() {
        let missing = RequestDescriptor::new(
            Endpoint::Predict,
            Some(json!({"symbol": "AAPL", "horizon": 5})),
        )
        .unwrap_err();
        assert!(matches!(
            missing,
            ShapeError::MissingField { field: "model", .. }
        ));

        let extra = RequestDescriptor::new(
            Endpoint::ForgotPassword,
            Some(json!({"email": "a@b.c", "phone": "1"})),
        )
        .unwrap_err();
        assert!(matches!(extra, ShapeError::UnknownField { ref field, .. } if field == "phone"));

        let not_object =
            RequestDescriptor::new(Endpoint::Login, Some(json!(["user", "pw"]))).unwrap_err();
        assert!(matches!(not_object, ShapeError::NotAnObject { .. }));
    }

    #[test]
    fn test_arbitrary_payload_accepts_any_json() {
        for body in [json!("text"), json!([1, 2]), json!({"a": {"b": null}})] {
            let req = RequestDescriptor::new(Endpoint::ContactSupport, Some(body.clone())).unwrap();
            assert_eq!(req.body(), Some(&body));
        }
        let err = RequestDescriptor::new(Endpoint::SavePersonalization, None).unwrap_err();
        assert!(matches!(err, ShapeError::MissingBody { .. }));
    }
}
