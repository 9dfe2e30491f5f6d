// ABOUTME: Server assembly for the postboard binary
// ABOUTME: Configuration, logging setup and the HTTP server with static file serving

pub mod config;
pub mod logging;
pub mod server;

pub use config::{Config, ConfigError};
pub use server::{build_app, run_server};
