//! Response reader
//!
//! Reassembles server output into lines and value blocks.
//!
//! ## Buffer Management
//!
//! TCP is a stream protocol: one read may return half a line, several lines,
//! or stop in the middle of a value block. Every read is appended to a
//! `BytesMut` accumulation buffer and complete units are split off the front.
//!
//! - **Line mode**: look for `\r\n`, split the line off, keep the rest.
//! - **Payload mode**: after a `VALUE` header, take exactly the announced
//!   number of bytes (which may contain `\r\n` themselves), then require a
//!   terminator.

use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};

use super::codec::CRLF;
use super::{CommandKind, Item, Response, ResponseLine};
use crate::config::{DEFAULT_MAX_VALUE_SIZE, DEFAULT_READ_CHUNK_SIZE};
use crate::error::{ClientError, Result};

/// Longest control line accepted before its terminator arrives
pub const MAX_LINE_LENGTH: usize = 2048;

/// Buffered reader producing protocol responses from a byte stream
#[derive(Debug)]
pub struct ResponseReader<R> {
    /// Underlying stream
    inner: R,

    /// Bytes received but not yet consumed
    buffer: BytesMut,

    /// Scratch space for a single stream read
    chunk: Vec<u8>,

    /// Largest value block accepted from the server
    max_payload: usize,
}

impl<R: Read> ResponseReader<R> {
    /// Create a reader with default chunk and payload limits
    pub fn new(inner: R) -> Self {
        Self::with_limits(inner, DEFAULT_READ_CHUNK_SIZE, DEFAULT_MAX_VALUE_SIZE)
    }

    /// Create a reader requesting `chunk_size` bytes per stream read
    pub fn with_limits(inner: R, chunk_size: usize, max_payload: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            inner,
            buffer: BytesMut::with_capacity(chunk_size * 2),
            chunk: vec![0u8; chunk_size],
            max_payload,
        }
    }

    /// Read one complete response, using `kind` to pick the grammar
    ///
    /// `set` and `delete` replies are a single line; a `get` reply runs
    /// until `END`. Bytes left over once the response is complete are
    /// unsolicited and reported as a protocol error.
    pub fn read_response(&mut self, kind: CommandKind) -> Result<Response> {
        let response = match kind {
            CommandKind::Set | CommandKind::Delete => Response::Line(self.read_line()?),
            CommandKind::Get => Response::Values(self.read_values()?),
        };

        if !self.buffer.is_empty() {
            return Err(ClientError::Protocol(format!(
                "{}: {} unexpected bytes after end of response",
                kind.verb(),
                self.buffer.len()
            )));
        }

        Ok(response)
    }

    /// Read and classify the next line
    pub fn read_line(&mut self) -> Result<ResponseLine> {
        let mut scanned = 0;
        loop {
            if let Some(offset) = self.buffer[scanned..].iter().position(|&b| b == b'\n') {
                let newline = scanned + offset;
                if newline == 0 || self.buffer[newline - 1] != b'\r' {
                    return Err(ClientError::Protocol(
                        "line terminated by bare LF".to_string(),
                    ));
                }

                let raw = self.buffer.split_to(newline - 1);
                self.buffer.advance(CRLF.len());
                let line = ResponseLine::parse(&raw)?;
                tracing::trace!("Received line: {}", line);
                return Ok(line);
            }

            if self.buffer.len() > MAX_LINE_LENGTH {
                return Err(ClientError::Protocol(format!(
                    "line exceeds {} bytes without a terminator",
                    MAX_LINE_LENGTH
                )));
            }

            scanned = self.buffer.len();
            self.fill()?;
        }
    }

    /// Read value blocks until `END`
    ///
    /// A second block is rejected before its payload is read, so a server
    /// cannot make the reader buffer more than one value.
    fn read_values(&mut self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            match self.read_line()? {
                ResponseLine::End => return Ok(items),
                ResponseLine::ValueHeader { key, flags, length } => {
                    // A single-key get yields at most one block
                    if !items.is_empty() {
                        return Err(ClientError::Protocol(format!(
                            "get: unexpected second value block for key {:?}",
                            String::from_utf8_lossy(&key)
                        )));
                    }
                    let data = self.read_payload(length)?;
                    items.push(Item { key, flags, data });
                }
                other => {
                    return Err(ClientError::Protocol(format!(
                        "get: unexpected reply {:?}",
                        other.to_string()
                    )))
                }
            }
        }
    }

    /// Take exactly `length` bytes followed by CRLF
    fn read_payload(&mut self, length: usize) -> Result<Vec<u8>> {
        if length > self.max_payload {
            return Err(ClientError::Protocol(format!(
                "value block of {} bytes exceeds limit of {}",
                length, self.max_payload
            )));
        }

        let needed = length.checked_add(CRLF.len()).ok_or_else(|| {
            ClientError::Protocol(format!("value block length {} overflows", length))
        })?;
        while self.buffer.len() < needed {
            self.fill()?;
        }

        if &self.buffer[length..needed] != CRLF {
            return Err(ClientError::Protocol(format!(
                "value block of {} bytes not followed by CRLF (byte count mismatch)",
                length
            )));
        }

        let data = self.buffer.split_to(length).to_vec();
        self.buffer.advance(CRLF.len());
        Ok(data)
    }

    /// Append one stream read to the buffer
    ///
    /// End of stream here always means the response was cut short.
    fn fill(&mut self) -> Result<usize> {
        let n = loop {
            match self.inner.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if n == 0 {
            return Err(ClientError::Protocol(format!(
                "truncated response: stream closed with {} bytes buffered",
                self.buffer.len()
            )));
        }

        self.buffer.extend_from_slice(&self.chunk[..n]);
        Ok(n)
    }
}

impl<R> ResponseReader<R> {
    /// Number of bytes received but not yet consumed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any buffered bytes
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutable access to the stream, used for writing requests
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
