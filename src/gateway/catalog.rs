//! Static catalog of backend operations.
//!
//! Each entry fixes the HTTP method, the path suffix under the base URL and
//! the request payload shape. Adding an operation means one new [`Endpoint`]
//! variant, one catalog row and one client function.

use std::fmt;

use serde::de::DeserializeOwned;

/// HTTP methods used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Shape a request body must have for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// No body is sent.
    Empty,
    /// A JSON object with exactly these top-level keys.
    Fields(&'static [&'static str]),
    /// Any JSON value, forwarded untouched.
    Any,
}

/// Shape of a successful response body.
///
/// Every backend operation answers with a JSON document; callers pick the
/// Rust type they decode it into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Json,
}

impl ResponseShape {
    /// Decode a success body into `T`.
    pub fn decode<T: DeserializeOwned>(self, body: &[u8]) -> Result<T, serde_json::Error> {
        match self {
            ResponseShape::Json => serde_json::from_slice(body),
        }
    }
}

/// Logical backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Predict,
    SaveAlertRules,
    Login,
    ForgotPassword,
    ContactSupport,
    GetPersonalization,
    SavePersonalization,
}

/// One catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDefinition {
    pub endpoint: Endpoint,
    /// Symbolic operation name used in logs and on the command line.
    pub name: &'static str,
    pub path_suffix: &'static str,
    pub method: HttpMethod,
    pub request: PayloadShape,
    pub response: ResponseShape,
}

static CATALOG: [EndpointDefinition; 8] = [
    EndpointDefinition {
        endpoint: Endpoint::Health,
        name: "health",
        path_suffix: "/health",
        method: HttpMethod::Get,
        request: PayloadShape::Empty,
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::Predict,
        name: "predict",
        path_suffix: "/predict",
        method: HttpMethod::Post,
        request: PayloadShape::Fields(&["symbol", "horizon", "model"]),
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::SaveAlertRules,
        name: "save-alert-rules",
        path_suffix: "/alerts/rules",
        method: HttpMethod::Post,
        request: PayloadShape::Fields(&["rules"]),
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::Login,
        name: "login",
        path_suffix: "/auth/login",
        method: HttpMethod::Post,
        request: PayloadShape::Fields(&["username", "password"]),
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::ForgotPassword,
        name: "forgot-password",
        path_suffix: "/auth/forgot-password",
        method: HttpMethod::Post,
        request: PayloadShape::Fields(&["email"]),
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::ContactSupport,
        name: "contact-support",
        path_suffix: "/support/contact",
        method: HttpMethod::Post,
        request: PayloadShape::Any,
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::GetPersonalization,
        name: "get-personalization",
        path_suffix: "/personalization",
        method: HttpMethod::Get,
        request: PayloadShape::Empty,
        response: ResponseShape::Json,
    },
    EndpointDefinition {
        endpoint: Endpoint::SavePersonalization,
        name: "save-personalization",
        path_suffix: "/personalization",
        method: HttpMethod::Post,
        request: PayloadShape::Any,
        response: ResponseShape::Json,
    },
];

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Health,
        Endpoint::Predict,
        Endpoint::SaveAlertRules,
        Endpoint::Login,
        Endpoint::ForgotPassword,
        Endpoint::ContactSupport,
        Endpoint::GetPersonalization,
        Endpoint::SavePersonalization,
    ];

    pub fn definition(self) -> &'static EndpointDefinition {
        // Catalog rows are declared in variant order.
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Look up an endpoint by its symbolic name.
    pub fn from_name(name: &str) -> Option<Endpoint> {
        EndpointCatalog::all()
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.endpoint)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view over the endpoint table.
pub struct EndpointCatalog;

impl EndpointCatalog {
    pub fn all() -> &'static [EndpointDefinition] {
        &CATALOG
    }

    /// Find the definition served at `method` + `path_suffix`.
    pub fn lookup(method: HttpMethod, path_suffix: &str) -> Option<&'static EndpointDefinition> {
        CATALOG
            .iter()
            .find(|def| def.method == method && def.path_suffix == path_suffix)
    }
}
