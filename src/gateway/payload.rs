//! Typed request bodies for the fixed-shape endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SecureString;

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub symbol: String,
    /// Forecast horizon in trading days.
    pub horizon: u32,
    pub model: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecureString,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

/// Body of `POST /alerts/rules`. The rules are forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRulesRequest<'a> {
    pub rules: &'a Value,
}
