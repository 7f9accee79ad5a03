//! Remote gateway client and endpoint catalog.
//!
//! ```text
//! operation(args) → RequestDescriptor (validated) → HTTP → decoded JSON | GatewayError
//! ```

mod catalog;
mod client;
mod error;
mod payload;
mod request;

pub use catalog::{
    Endpoint, EndpointCatalog, EndpointDefinition, HttpMethod, PayloadShape, ResponseShape,
};
pub use client::GatewayClient;
pub use error::{GatewayError, GatewayErrorKind, ShapeError};
pub use payload::{AlertRulesRequest, ForgotPasswordRequest, LoginRequest, PredictRequest};
pub use request::RequestDescriptor;
