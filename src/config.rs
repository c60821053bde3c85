use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives
    pub filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                // Falls back to HOSTNAME (Docker/Kubernetes), otherwise "unknown"
                instance_id: env::var("INSTANCE_ID")
                    .or_else(|_| env::var("HOSTNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
            },
            logging: LoggingConfig {
                filter: env::var("RUST_LOG").unwrap_or_else(|_| "info,rho=debug".to_string()),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
