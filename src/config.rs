//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use thiserror::Error;

use crate::store::DEFAULT_PAGE_SIZE;

/// Configuration could not be loaded.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Which store backend serves the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// DynamoDB table
    DynamoDb {
        region: String,
        table_name: String,
        /// Endpoint override, e.g. a DynamoDB Local instance
        endpoint_url: Option<String>,
    },
    /// Process-local store, lost on restart
    Memory,
}

/// Server configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    /// Records per scan page (in-memory store only)
    pub scan_page_size: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_BACKEND` - `dynamodb` or `memory` (default: dynamodb)
    /// - `REGION` - Store region (required for dynamodb)
    /// - `DYNAMO_DB` - Table name (required for dynamodb)
    /// - `DYNAMO_ENDPOINT` - Endpoint override (optional)
    /// - `SCAN_PAGE_SIZE` - In-memory scan page size (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config reading each variable through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "dynamodb".to_string());

        let store = match backend.to_ascii_lowercase().as_str() {
            "dynamodb" => StoreConfig::DynamoDb {
                region: lookup("REGION").ok_or(ConfigError::Missing("REGION"))?,
                table_name: lookup("DYNAMO_DB").ok_or(ConfigError::Missing("DYNAMO_DB"))?,
                endpoint_url: lookup("DYNAMO_ENDPOINT"),
            },
            "memory" => StoreConfig::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: backend,
                })
            }
        };

        Ok(Self {
            store,
            scan_page_size: parse_or(&lookup, "SCAN_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            server_port: parse_or(&lookup, "SERVER_PORT", 3000)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::Memory,
            scan_page_size: DEFAULT_PAGE_SIZE,
            server_port: 3000,
        }
    }
}
