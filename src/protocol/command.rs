//! Command definitions
//!
//! Represents requests sent to the cache server.

use crate::error::{ClientError, Result};

/// Longest key the server accepts
pub const MAX_KEY_LENGTH: usize = 250;

/// Command kinds
///
/// The kind selects the response grammar the reader expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Set,
    Get,
    Delete,
}

impl CommandKind {
    /// Verb as written on the wire
    pub fn verb(&self) -> &'static str {
        match self {
            CommandKind::Set => "set",
            CommandKind::Get => "get",
            CommandKind::Delete => "delete",
        }
    }
}

/// A request to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Store a value unconditionally
    Set {
        key: &'a [u8],
        value: &'a [u8],
        flags: u32,
        expiration: u32,
    },

    /// Fetch a value by key
    Get { key: &'a [u8] },

    /// Delete a key
    Delete { key: &'a [u8] },
}

impl<'a> Command<'a> {
    /// Get the command kind
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Set { .. } => CommandKind::Set,
            Command::Get { .. } => CommandKind::Get,
            Command::Delete { .. } => CommandKind::Delete,
        }
    }

    /// Key the command addresses
    pub fn key(&self) -> &'a [u8] {
        match self {
            Command::Set { key, .. } | Command::Get { key } | Command::Delete { key } => *key,
        }
    }
}

/// Check that `key` can be written as a single protocol token.
///
/// Rejects empty keys, keys longer than [`MAX_KEY_LENGTH`], and keys holding
/// a space or any control byte (which covers `\r` and `\n`).
pub fn validate_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(ClientError::Validation("Key must not be empty".to_string()));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(ClientError::Validation(format!(
            "Key is too long: {} bytes (max {})",
            key.len(),
            MAX_KEY_LENGTH
        )));
    }

    if let Some(pos) = key.iter().position(|&b| b == b' ' || b.is_ascii_control()) {
        let reason = if key[pos] == b' ' {
            "Key should not contain spaces".to_string()
        } else {
            format!("Key contains control byte 0x{:02x} at offset {}", key[pos], pos)
        };
        return Err(ClientError::Validation(reason));
    }

    Ok(())
}

/// Check that `value` fits under the configured size limit
pub fn validate_value(value: &[u8], max_value_size: usize) -> Result<()> {
    if value.len() > max_value_size {
        return Err(ClientError::Validation(format!(
            "Value is too large: {} bytes (max {})",
            value.len(),
            max_value_size
        )));
    }
    Ok(())
}
