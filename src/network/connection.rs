//! Connection
//!
//! Owns the duplex stream to the cache server together with the reader's
//! accumulation buffer. Exactly one command is in flight at a time: every
//! call to `exec` writes one request and reads its whole response.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::protocol::{write_command, Command, Response, ResponseReader};

/// A single connection to a cache server
///
/// Not synchronized. After a stream or protocol error the framing position
/// is unknown, so the connection refuses further commands.
#[derive(Debug)]
pub struct Connection<S = TcpStream> {
    /// Stream, wrapped by the reader so buffered bytes stay with it
    reader: ResponseReader<S>,

    /// Reused request buffer
    write_buf: Vec<u8>,

    /// Peer address for logging
    peer_addr: String,

    /// Set once an error has desynchronized the stream
    broken: bool,
}

impl Connection<TcpStream> {
    /// Open a TCP connection using the address and timeouts in `config`
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let addrs: Vec<_> = config
            .server_addr
            .to_socket_addrs()
            .map_err(|e| {
                ClientError::Config(format!("Cannot resolve {}: {}", config.server_addr, e))
            })?
            .collect();

        if addrs.is_empty() {
            return Err(ClientError::Config(format!(
                "{} resolved to no addresses",
                config.server_addr
            )));
        }

        let mut last_err = None;
        let mut connected = None;
        for addr in &addrs {
            let attempt = if config.connect_timeout_ms > 0 {
                TcpStream::connect_timeout(addr, Duration::from_millis(config.connect_timeout_ms))
            } else {
                TcpStream::connect(addr)
            };
            match attempt {
                Ok(stream) => {
                    connected = Some(stream);
                    break;
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        let stream = match connected {
            Some(stream) => stream,
            None => {
                return Err(last_err.map(ClientError::from).unwrap_or_else(|| {
                    ClientError::Config(format!("Cannot connect to {}", config.server_addr))
                }))
            }
        };

        // Requests are small and latency-bound
        stream.set_nodelay(true)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.server_addr.clone());

        tracing::debug!("Connected to {}", peer_addr);
        Ok(Self::from_stream(stream, config, peer_addr))
    }

    /// Shut down both halves of the socket
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);
        match self.reader.get_mut().shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already-established stream
    pub fn from_stream(stream: S, config: &Config, peer_addr: impl Into<String>) -> Self {
        Self {
            reader: ResponseReader::with_limits(stream, config.read_chunk_size, config.max_value_size),
            write_buf: Vec::with_capacity(256),
            peer_addr: peer_addr.into(),
            broken: false,
        }
    }

    /// Send one command and read its complete response
    pub fn exec(&mut self, command: &Command<'_>) -> Result<Response> {
        self.call(command, Ok)
    }

    /// Send one command and interpret its response with `decode`
    ///
    /// An I/O or protocol failure, whether raised while reading or while
    /// decoding, marks the connection broken; later calls fail with
    /// [`ClientError::Broken`] without touching the stream.
    pub fn call<T, F>(&mut self, command: &Command<'_>, decode: F) -> Result<T>
    where
        F: FnOnce(Response) -> Result<T>,
    {
        if self.broken {
            return Err(ClientError::Broken);
        }

        tracing::trace!(
            "Sending {} {:?} to {}",
            command.kind().verb(),
            String::from_utf8_lossy(command.key()),
            self.peer_addr
        );

        let result = self.round_trip(command).and_then(decode);
        if let Err(ref e) = result {
            if e.breaks_connection() {
                tracing::warn!("Connection to {} is now unusable: {}", self.peer_addr, e);
                self.broken = true;
                self.reader.clear();
            }
        }
        result
    }

    fn round_trip(&mut self, command: &Command<'_>) -> Result<Response> {
        write_command(self.reader.get_mut(), command, &mut self.write_buf)?;
        self.reader.read_response(command.kind())
    }
}

impl<S> Connection<S> {
    /// Whether an earlier error has made this connection unusable
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Refuse further commands on this connection
    pub(crate) fn mark_broken(&mut self) {
        self.broken = true;
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }

    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}
