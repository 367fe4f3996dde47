//! Protocol codec
//!
//! Encoding of requests and interpretation of parsed responses.
//!
//! ## Wire Format
//!
//! ### Requests
//! ```text
//! set <key> <flags> <exptime> <bytes>\r\n<data>\r\n
//! get <key>\r\n
//! delete <key>\r\n
//! ```
//!
//! ### Responses
//! ```text
//! set:    STORED | NOT_STORED | ERROR | CLIENT_ERROR <msg> | SERVER_ERROR <msg>
//! delete: DELETED | NOT_FOUND
//! get:    [VALUE <key> <flags> <bytes> [<cas>]\r\n<data>\r\n]* END\r\n
//! ```

use std::io::Write;

use super::{Command, Item, Response, ResponseLine};
use crate::error::{ClientError, Result};

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command to bytes
pub fn encode_command(command: &Command<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    encode_command_into(command, &mut out);
    out
}

/// Encode a command, appending to `out`
///
/// The value of a `set` is copied as raw bytes; its length header is the
/// byte count, never a character count.
pub fn encode_command_into(command: &Command<'_>, out: &mut Vec<u8>) {
    match command {
        Command::Set {
            key,
            value,
            flags,
            expiration,
        } => {
            out.reserve(key.len() + value.len() + 48);
            out.extend_from_slice(b"set ");
            out.extend_from_slice(key);
            out.extend_from_slice(format!(" {} {} {}", flags, expiration, value.len()).as_bytes());
            out.extend_from_slice(CRLF);
            out.extend_from_slice(value);
            out.extend_from_slice(CRLF);
        }
        Command::Get { key } => {
            out.extend_from_slice(b"get ");
            out.extend_from_slice(key);
            out.extend_from_slice(CRLF);
        }
        Command::Delete { key } => {
            out.extend_from_slice(b"delete ");
            out.extend_from_slice(key);
            out.extend_from_slice(CRLF);
        }
    }
}

/// Write a command to a stream in a single `write_all`
pub fn write_command<W: Write>(writer: &mut W, command: &Command<'_>, buf: &mut Vec<u8>) -> Result<()> {
    buf.clear();
    encode_command_into(command, buf);
    writer.write_all(buf)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Interpretation
// =============================================================================

/// Interpret the reply to `set`
///
/// `STORED` is success and `NOT_STORED` a defined refusal; every other line
/// is a protocol failure.
pub fn decode_set(response: Response) -> Result<bool> {
    match expect_line(response, "set")? {
        ResponseLine::Stored => Ok(true),
        ResponseLine::NotStored => Ok(false),
        other => Err(unexpected("set", &other)),
    }
}

/// Interpret the reply to `delete`
///
/// `NOT_FOUND` is a miss, reported as `false` rather than an error.
pub fn decode_delete(response: Response) -> Result<bool> {
    match expect_line(response, "delete")? {
        ResponseLine::Deleted => Ok(true),
        ResponseLine::NotFound => Ok(false),
        other => Err(unexpected("delete", &other)),
    }
}

/// Interpret the reply to `get` for `key`
///
/// No value block means a miss. More than one block, or a block for another
/// key, is a protocol failure.
pub fn decode_get(response: Response, key: &[u8]) -> Result<Option<Item>> {
    let mut items = match response {
        Response::Values(items) => items,
        Response::Line(line) => return Err(unexpected("get", &line)),
    };

    if items.len() > 1 {
        return Err(ClientError::Protocol(format!(
            "get: expected at most one value block, got {}",
            items.len()
        )));
    }

    match items.pop() {
        None => Ok(None),
        Some(item) if item.key != key => Err(ClientError::Protocol(format!(
            "get: value block for key {:?}, requested {:?}",
            String::from_utf8_lossy(&item.key),
            String::from_utf8_lossy(key)
        ))),
        Some(item) => Ok(Some(item)),
    }
}

fn expect_line(response: Response, verb: &str) -> Result<ResponseLine> {
    match response {
        Response::Line(line) => Ok(line),
        Response::Values(_) => Err(ClientError::Protocol(format!(
            "{}: unexpected value blocks in reply",
            verb
        ))),
    }
}

fn unexpected(verb: &str, line: &ResponseLine) -> ClientError {
    ClientError::Protocol(format!("{}: unexpected reply {:?}", verb, line.to_string()))
}
