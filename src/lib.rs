//! # memclient
//!
//! A synchronous client for the memcached text protocol, limited to
//! `set`, `get` and `delete` over a single TCP connection.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Client (set/get/delete)                   │
//! │              validation, outcome interpretation              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command (kind tags the reply grammar)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Connection                            │
//! │              one write, then one full response               │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │ encode                           │ read
//!            ▼                                  ▼
//!   ┌─────────────────┐               ┌──────────────────┐
//!   │      Codec      │               │  ResponseReader  │
//!   │ (request bytes) │               │ (lines + blocks) │
//!   └─────────────────┘               └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use memclient::Client;
//!
//! let mut client = Client::connect("127.0.0.1:11211")?;
//! assert!(client.set(b"greeting", b"hello")?);
//! assert_eq!(client.get(b"greeting")?, Some(b"hello".to_vec()));
//! assert!(client.delete(b"greeting")?);
//! assert_eq!(client.get(b"greeting")?, None);
//! # Ok::<(), memclient::ClientError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result};
pub use config::Config;
pub use client::Client;
pub use shared::SharedClient;
pub use protocol::Item;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memclient
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
