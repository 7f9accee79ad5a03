//! Effective gateway base address.

use std::fmt;

use super::loader::is_http_url;
use super::types::GatewayConfig;

/// Environment variable that overrides the configured API base.
pub const API_BASE_ENV: &str = "MARKETDESK_API_BASE";

/// Prefix used when neither the environment nor the config names a base.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Absolute base URL every endpoint path suffix is appended to.
///
/// Never ends with a `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Resolve `value` against `origin`.
    ///
    /// Absolute http(s) values are taken as-is; anything else is treated as
    /// a path prefix under `origin`.
    pub fn resolve(origin: &str, value: &str) -> Self {
        let value = value.trim();
        let joined = if is_http_url(value) {
            value.to_string()
        } else {
            format!(
                "{}/{}",
                origin.trim().trim_end_matches('/'),
                value.trim_start_matches('/')
            )
        };
        Self(joined.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append an endpoint path suffix (`/health`, `/auth/login`, ...).
    pub fn join(&self, suffix: &str) -> String {
        format!("{}/{}", self.0, suffix.trim_start_matches('/'))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl GatewayConfig {
    /// Effective base URL, consulting [`API_BASE_ENV`] first.
    pub fn base_url(&self) -> BaseUrl {
        let env_override = std::env::var(API_BASE_ENV).ok();
        self.base_url_with(env_override.as_deref())
    }

    /// Effective base URL given an explicit override value.
    ///
    /// Precedence: non-empty override, then `api_base`, then [`DEFAULT_API_PREFIX`].
    pub fn base_url_with(&self, override_value: Option<&str>) -> BaseUrl {
        let value = override_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| {
                self.api_base
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            })
            .unwrap_or(DEFAULT_API_PREFIX);
        BaseUrl::resolve(&self.origin, value)
    }
}
