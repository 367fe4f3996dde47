//! Client Module
//!
//! The public `set` / `get` / `delete` operations.
//!
//! Each operation validates its input, sends exactly one request on the
//! client's connection and interprets the reply for that command kind.
//! Nothing is retried and the connection is never reopened implicitly.
//!
//! ## Outcomes
//! - `get` on a missing key returns `Ok(None)`
//! - `delete` on a missing key returns `Ok(false)`
//! - `set` refused with `NOT_STORED` returns `Ok(false)`
//!
//! Everything else the server might say is a `Protocol` error.

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{
    decode_delete, decode_get, decode_set, validate_key, validate_value, Command, Item,
};

/// Synchronous client over one connection
///
/// Operations take `&mut self`, so a client can only run one command at a
/// time. Share it across threads through [`crate::SharedClient`] or use one
/// client per thread.
pub struct Client<S = TcpStream> {
    conn: Connection<S>,
    config: Config,
}

impl Client<TcpStream> {
    /// Connect to `addr` with default settings
    pub fn connect(addr: impl Into<String>) -> Result<Self> {
        Self::with_config(Config::builder().server_addr(addr).build())
    }

    /// Connect using a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let conn = Connection::connect(&config)?;
        Ok(Self { conn, config })
    }

    /// Replace the connection with a fresh one
    ///
    /// This is the recovery path after an error has left the connection
    /// broken. The old socket is closed first; if the new one cannot be
    /// opened the client stays broken and `reconnect` can be called again.
    pub fn reconnect(&mut self) -> Result<()> {
        tracing::debug!("Reconnecting to {}", self.config.server_addr);
        self.conn.mark_broken();
        if let Err(e) = self.conn.shutdown() {
            tracing::debug!("Ignoring error while closing old connection: {}", e);
        }
        self.conn = Connection::connect(&self.config)?;
        Ok(())
    }

    /// Close the connection
    ///
    /// Dropping the client closes it too; this surfaces shutdown errors.
    pub fn close(mut self) -> Result<()> {
        self.conn.shutdown()
    }
}

impl<S: Read + Write> Client<S> {
    /// Build a client over an already-open stream
    pub fn from_stream(stream: S, config: Config) -> Result<Self> {
        config.validate()?;
        let conn = Connection::from_stream(stream, &config, config.server_addr.clone());
        Ok(Self { conn, config })
    }

    /// Store `value` under `key` with no expiration and zero flags
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<bool> {
        self.set_with(key, value, 0, 0)
    }

    /// Store `value` under `key`
    ///
    /// `expiration` is in seconds, 0 meaning never. `flags` is stored
    /// alongside the value and returned by [`Client::get_item`].
    pub fn set_with(&mut self, key: &[u8], value: &[u8], expiration: u32, flags: u32) -> Result<bool> {
        validate_key(key)?;
        validate_value(value, self.config.max_value_size)?;

        let command = Command::Set {
            key,
            value,
            flags,
            expiration,
        };
        self.conn.call(&command, decode_set)
    }

    /// Fetch the value stored under `key`
    pub fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.get_item(key)?.map(|item| item.data))
    }

    /// Fetch the value and flags stored under `key`
    pub fn get_item(&mut self, key: &[u8]) -> Result<Option<Item>> {
        validate_key(key)?;
        self.conn
            .call(&Command::Get { key }, |response| decode_get(response, key))
    }

    /// Delete `key`. Returns false when the key was not present.
    pub fn delete(&mut self, key: &[u8]) -> Result<bool> {
        validate_key(key)?;
        self.conn.call(&Command::Delete { key }, decode_delete)
    }
}

impl<S> Client<S> {
    /// Whether an earlier error has made the connection unusable
    pub fn is_broken(&self) -> bool {
        self.conn.is_broken()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> &Connection<S> {
        &self.conn
    }

    /// Consume the client and return the underlying stream
    pub fn into_inner(self) -> S {
        self.conn.into_inner()
    }
}
