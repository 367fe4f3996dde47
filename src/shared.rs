//! Shared Client
//!
//! A mutex around one [`Client`] for callers that need a single connection
//! from several threads. Commands are serialized; there is no pooling.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::protocol::Item;

/// Cloneable, thread-safe handle to one client connection
pub struct SharedClient<S = TcpStream> {
    inner: Arc<Mutex<Client<S>>>,
}

impl<S> Clone for SharedClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedClient<TcpStream> {
    /// Connect using a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::new(Client::with_config(config)?))
    }

    /// Replace a broken connection with a fresh one
    pub fn reconnect(&self) -> Result<()> {
        self.inner.lock().reconnect()
    }
}

impl<S: Read + Write> SharedClient<S> {
    pub fn new(client: Client<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<bool> {
        self.inner.lock().set(key, value)
    }

    pub fn set_with(&self, key: &[u8], value: &[u8], expiration: u32, flags: u32) -> Result<bool> {
        self.inner.lock().set_with(key, value, expiration, flags)
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.lock().get(key)
    }

    pub fn get_item(&self, key: &[u8]) -> Result<Option<Item>> {
        self.inner.lock().get_item(key)
    }

    pub fn delete(&self, key: &[u8]) -> Result<bool> {
        self.inner.lock().delete(key)
    }

    pub fn is_broken(&self) -> bool {
        self.inner.lock().is_broken()
    }
}
