//! Network Module
//!
//! The single TCP connection to the cache server.
//!
//! ## Model
//! - One connection per client, opened at construction
//! - Blocking request/response, one command in flight
//! - Read/write timeouts set on the socket at connect time

mod connection;

pub use connection::Connection;
