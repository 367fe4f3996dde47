//! Configuration for memclient
//!
//! Centralized configuration with sensible defaults.

use crate::error::{ClientError, Result};

/// Default maximum value size accepted by `set` (1 MB)
pub const DEFAULT_MAX_VALUE_SIZE: usize = 1024 * 1024;

/// Default number of bytes requested per stream read
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1024;

/// Main configuration for a client connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Cache server address (host:port)
    pub server_addr: String,

    /// Connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest value `set` will send (in bytes)
    pub max_value_size: usize,

    /// Bytes requested from the stream per read
    pub read_chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:11211".to_string(),
            connect_timeout_ms: 7000,
            read_timeout_ms: 7000,
            write_timeout_ms: 7000,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the client cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk_size == 0 {
            return Err(ClientError::Config(
                "read_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.max_value_size == 0 {
            return Err(ClientError::Config(
                "max_value_size must be greater than zero".to_string(),
            ));
        }
        if self.server_addr.is_empty() {
            return Err(ClientError::Config("server_addr is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server address
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the maximum value size (in bytes)
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.config.max_value_size = size;
        self
    }

    /// Set the per-read chunk size (in bytes)
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.config.read_chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
