//! config-rs/lib.rs
//! Shared configuration utilities for the survey gateway services
//! Provides standardized functions for port/address management and secrets

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(String),

    #[error("Environment variable {0} is empty")]
    Empty(String),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}

/// Load a `.env` file from the working directory if one exists
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }
}

/// Get service port from environment variables with proper fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "SURVEY_GATEWAY")
/// * `default_port` - The default port to use if not specified in environment
///
/// # Returns
/// The port number to use for the service
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    env::var(&var_name)
        .unwrap_or_else(|_| default_port.to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            log::warn!("Invalid port in {}, using default {}", var_name, default_port);
            default_port
        })
}

/// Create a SocketAddr for binding a service
///
/// A full `<SERVICE>_SERVICE_ADDR` override wins over the port variable.
/// Accepts both `host:port` and `http://host:port` forms.
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Ok(addr_str) = env::var(&var_name) {
        if let Ok(addr) = addr_str.parse::<SocketAddr>() {
            return addr;
        }
        if let Some((_, rest)) = addr_str.split_once("://") {
            if let Ok(addr) = rest.parse::<SocketAddr>() {
                return addr;
            }
        }
        log::warn!("Invalid address format in {}, using default", var_name);
    }

    let port = get_service_port(service_name, default_port);
    SocketAddr::from(([0, 0, 0, 0], port))
}

/// Read a secret that must be present and non-empty
pub fn get_required_secret(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty(name.to_string())),
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::Missing(name.to_string())),
    }
}

/// Read an optional string setting
pub fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse an optional setting, rejecting unparsable values
pub fn get_parsed_or<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
        _ => Ok(default),
    }
}
