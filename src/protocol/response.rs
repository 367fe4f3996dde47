//! Response definitions
//!
//! Represents lines and value blocks received from the server.

use std::fmt;

use crate::error::{ClientError, Result};

/// One CRLF-terminated line of server output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseLine {
    Stored,
    NotStored,
    Deleted,
    NotFound,
    End,

    /// `VALUE <key> <flags> <bytes> [<cas>]`, announcing a value block
    ValueHeader {
        key: Vec<u8>,
        flags: u32,
        length: usize,
    },

    /// Bare `ERROR`: the server did not recognize the command
    Error,

    /// `CLIENT_ERROR <message>`
    ClientError(String),

    /// `SERVER_ERROR <message>`
    ServerError(String),

    /// Anything else, kept verbatim for error reporting
    Unknown(String),
}

impl ResponseLine {
    /// Classify a line (terminator already stripped)
    pub fn parse(line: &[u8]) -> Result<Self> {
        let parsed = match line {
            b"STORED" => ResponseLine::Stored,
            b"NOT_STORED" => ResponseLine::NotStored,
            b"DELETED" => ResponseLine::Deleted,
            b"NOT_FOUND" => ResponseLine::NotFound,
            b"END" => ResponseLine::End,
            b"ERROR" => ResponseLine::Error,
            b"CLIENT_ERROR" => ResponseLine::ClientError(String::new()),
            b"SERVER_ERROR" => ResponseLine::ServerError(String::new()),
            _ => {
                if let Some(rest) = line.strip_prefix(b"VALUE ") {
                    parse_value_header(rest)?
                } else if let Some(rest) = line.strip_prefix(b"CLIENT_ERROR ") {
                    ResponseLine::ClientError(trimmed_text(rest))
                } else if let Some(rest) = line.strip_prefix(b"SERVER_ERROR ") {
                    ResponseLine::ServerError(trimmed_text(rest))
                } else {
                    ResponseLine::Unknown(String::from_utf8_lossy(line).into_owned())
                }
            }
        };
        Ok(parsed)
    }
}

impl fmt::Display for ResponseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseLine::Stored => write!(f, "STORED"),
            ResponseLine::NotStored => write!(f, "NOT_STORED"),
            ResponseLine::Deleted => write!(f, "DELETED"),
            ResponseLine::NotFound => write!(f, "NOT_FOUND"),
            ResponseLine::End => write!(f, "END"),
            ResponseLine::ValueHeader { key, flags, length } => write!(
                f,
                "VALUE {} {} {}",
                String::from_utf8_lossy(key),
                flags,
                length
            ),
            ResponseLine::Error => write!(f, "ERROR"),
            ResponseLine::ClientError(msg) => write!(f, "CLIENT_ERROR {}", msg),
            ResponseLine::ServerError(msg) => write!(f, "SERVER_ERROR {}", msg),
            ResponseLine::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

fn parse_value_header(rest: &[u8]) -> Result<ResponseLine> {
    let tokens: Vec<&[u8]> = rest.split(|&b| b == b' ').filter(|t| !t.is_empty()).collect();

    // The fourth token, when present, is the CAS unique; it is not used here.
    if tokens.len() != 3 && tokens.len() != 4 {
        return Err(ClientError::Protocol(format!(
            "Malformed VALUE header: expected 3 or 4 fields, got {}",
            tokens.len()
        )));
    }

    let flags = parse_number::<u32>(tokens[1], "flags")?;
    let length = parse_number::<usize>(tokens[2], "byte count")?;

    Ok(ResponseLine::ValueHeader {
        key: tokens[0].to_vec(),
        flags,
        length,
    })
}

fn parse_number<T: std::str::FromStr>(token: &[u8], field: &str) -> Result<T> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| {
            ClientError::Protocol(format!(
                "Malformed VALUE header: invalid {} {:?}",
                field,
                String::from_utf8_lossy(token)
            ))
        })
}

fn trimmed_text(rest: &[u8]) -> String {
    String::from_utf8_lossy(rest).trim().to_string()
}

/// A value block returned by `get`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: Vec<u8>,
    pub flags: u32,
    pub data: Vec<u8>,
}

/// A complete response to one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Single control line (`set`, `delete`)
    Line(ResponseLine),

    /// Value blocks read before `END` (`get`)
    Values(Vec<Item>),
}
