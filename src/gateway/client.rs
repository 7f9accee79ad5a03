use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{BaseUrl, GatewayConfig};
use crate::gateway::catalog::Endpoint;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    AlertRulesRequest, ForgotPasswordRequest, LoginRequest, PredictRequest,
};
use crate::gateway::request::RequestDescriptor;

/// Typed client for the analytics/alerting backend.
///
/// Cheap to clone; clones share the connection pool. Calls are independent:
/// no retries, no deduplication, no caching. Callers that stop caring about
/// an in-flight call simply drop or ignore its result.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: BaseUrl,
}

impl GatewayClient {
    pub fn new(base_url: BaseUrl, config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Wrap an already-built HTTP client.
    pub fn with_client(base_url: BaseUrl, client: Client) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Absolute URL a descriptor is sent to.
    pub fn url_for(&self, request: &RequestDescriptor) -> String {
        self.base_url.join(request.path_suffix())
    }

    /// Issue a descriptor and decode the success body as `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, GatewayError> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "gateway",
            operation = request.operation(),
            request_id = %request_id
        );
        self.issue(request).instrument(span).await
    }

    async fn issue<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, GatewayError> {
        let operation = request.operation();
        let url = self.url_for(request);
        tracing::debug!(method = %request.method(), url = %url, "Issuing gateway request");

        let mut builder = self.client.request(request.method().into(), &url);
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.encoded_body() {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|source| {
            tracing::warn!(error = %source, "Gateway request failed before a response");
            GatewayError::Network { operation, source }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|source| GatewayError::Network { operation, source })?;
            tracing::warn!(status = status.as_u16(), "Gateway returned error status");
            return Err(GatewayError::HttpStatus {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Network { operation, source })?;

        let shape = request.endpoint().definition().response;
        shape.decode(&bytes).map_err(|source| {
            tracing::warn!(error = %source, "Gateway response did not decode");
            GatewayError::Decode {
                operation,
                body: String::from_utf8_lossy(&bytes).into_owned(),
                source,
            }
        })
    }

    async fn call(&self, request: RequestDescriptor) -> Result<Value, GatewayError> {
        self.execute(&request).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Value, GatewayError> {
        self.call(RequestDescriptor::new(Endpoint::Health, None)?).await
    }

    /// `POST /predict` with `{symbol, horizon, model}`.
    pub async fn predict(&self, request: &PredictRequest) -> Result<Value, GatewayError> {
        self.call(RequestDescriptor::with_payload(Endpoint::Predict, request)?).await
    }

    /// `POST /alerts/rules`, always wrapping the argument as `{rules}`.
    pub async fn save_alert_rules(&self, rules: &Value) -> Result<Value, GatewayError> {
        let payload = AlertRulesRequest { rules };
        self.call(RequestDescriptor::with_payload(
            Endpoint::SaveAlertRules,
            &payload,
        )?)
        .await
    }

    /// `POST /auth/login` with `{username, password}`.
    pub async fn login(&self, request: &LoginRequest) -> Result<Value, GatewayError> {
        self.call(RequestDescriptor::with_payload(Endpoint::Login, request)?).await
    }

    /// `POST /auth/forgot-password` with `{email}`.
    pub async fn forgot_password(&self, email: &str) -> Result<Value, GatewayError> {
        let payload = ForgotPasswordRequest { email };
        self.call(RequestDescriptor::with_payload(
            Endpoint::ForgotPassword,
            &payload,
        )?)
        .await
    }

    /// `POST /support/contact` with an arbitrary payload.
    pub async fn contact_support(&self, payload: &Value) -> Result<Value, GatewayError> {
        self.call(RequestDescriptor::with_payload(
            Endpoint::ContactSupport,
            payload,
        )?)
        .await
    }

    /// `GET /personalization`
    pub async fn get_personalization(&self) -> Result<Value, GatewayError> {
        self.call(RequestDescriptor::new(Endpoint::GetPersonalization, None)?).await
    }

    /// `POST /personalization` with an arbitrary payload.
    pub async fn save_personalization(&self, payload: &Value) -> Result<Value, GatewayError> {
        self.call(RequestDescriptor::with_payload(
            Endpoint::SavePersonalization,
            payload,
        )?)
        .await
    }
}
