use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;

use axum::http::HeaderValue;
use postboard_storage::StorageConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[source] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid DATABASE_MAX_CONNECTIONS: {0}")]
    InvalidMaxConnections(#[source] ParseIntError),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub public_dir: PathBuf,
    pub upload_dir: PathBuf,
    /// `None` allows any origin
    pub cors_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_str = lookup("HOST").unwrap_or_else(|| postboard_core::DEFAULT_HOST.to_string());
        let host = host_str
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(ConfigError::InvalidPort)?,
            None => postboard_core::DEFAULT_PORT,
        };

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| postboard_core::DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .map_err(ConfigError::InvalidMaxConnections)?,
            None => postboard_core::DEFAULT_MAX_CONNECTIONS,
        };

        let public_dir = lookup("PUBLIC_DIR")
            .unwrap_or_else(|| postboard_core::DEFAULT_PUBLIC_DIR.to_string())
            .into();
        let upload_dir = lookup("UPLOAD_DIR")
            .unwrap_or_else(|| postboard_core::DEFAULT_UPLOAD_DIR.to_string())
            .into();

        let cors_origin = match lookup("CORS_ORIGIN").filter(|o| !o.is_empty() && o != "*") {
            Some(origin) => Some(
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?,
            ),
            None => None,
        };

        Ok(Config {
            host,
            port,
            database_url,
            max_connections,
            public_dir,
            upload_dir,
            cors_origin,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            ..StorageConfig::default()
        }
    }
}
