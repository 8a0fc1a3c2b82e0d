use std::{net::SocketAddr, time::Duration};

/// Base URL of the providers' mock gateway when none is configured.
const DEFAULT_PROVIDER_BASE_URL: &str = "https://web-production-84144.up.railway.app";

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Single base URL shared by all three provider adapters.
    pub provider_base_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("Invalid LISTEN_ADDR");
        let provider_base_url = std::env::var("PROVIDER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let cors_allow = std::env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            listen_addr,
            provider_base_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}
