//! Configuration loading and process-wide settings.
//!
//! The gateway base address and navigation limits are read once at startup
//! (file, then environment, then CLI override) and handed to the components
//! that need them as immutable values.

mod base_url;
mod credentials;
mod loader;
mod types;

pub use base_url::{BaseUrl, API_BASE_ENV, DEFAULT_API_PREFIX};
pub use credentials::SecureString;
pub use loader::ConfigError;
pub use types::{Config, GatewayConfig, NavigationConfig};
