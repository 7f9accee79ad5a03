//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use marketdesk::config::{BaseUrl, GatewayConfig};
use marketdesk::gateway::GatewayClient;
use std::net::TcpListener;
use std::path::PathBuf;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Gateway client pointed at `base_url`.
pub fn client_for(base_url: &str) -> GatewayClient {
    let config = GatewayConfig {
        connect_timeout_seconds: 2,
        ..GatewayConfig::default()
    };
    GatewayClient::new(BaseUrl::resolve(&config.origin, base_url), &config)
        .expect("Failed to build gateway client")
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
