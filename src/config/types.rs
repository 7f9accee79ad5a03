use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Settings for the remote gateway client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Origin the presentation layer is served from (scheme + host + port).
    /// Relative API prefixes are joined onto it.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// API base override. Absolute URL or a path prefix such as `/api`.
    #[serde(default)]
    pub api_base: Option<String>,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Settings for the navigation resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Upper bound on redirect hops within one resolution (default: 16).
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_origin() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_max_redirects() -> usize {
    16
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            api_base: None,
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
        }
    }
}
