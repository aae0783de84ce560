//! TCP transport for the matrix control port.
//!
//! This module provides the [`TcpTransport`] struct which owns the socket to
//! the switcher. It only knows about bytes: commands are written as-is and
//! each reply is taken from a single read, the way the device answers.
//!
//! # Design
//!
//! - **Synchronous** - connect, write and read block the calling thread
//! - **Optional timeout** - without one, a silent device blocks forever
//! - **One socket** - closed exactly once, when the transport is dropped
//!
//! # Example
//!
//! ```no_run
//! use hdmi_matrix::{TcpTransport, DEFAULT_PORT};
//! use std::time::Duration;
//!
//! let mut transport = TcpTransport::connect(
//!     "192.168.1.60",
//!     DEFAULT_PORT,
//!     Some(Duration::from_secs(2)),
//! )?;
//! let reply = transport.send_receive(b"Bc")?;
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{MatrixError, Result};

/// Default control port of the switcher (telnet).
pub const DEFAULT_PORT: u16 = 23;

/// Largest reply read in one go.
pub const MAX_REPLY_SIZE: usize = 1024;

fn map_io_error(e: io::Error) -> MatrixError {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => MatrixError::Timeout,
        _ => MatrixError::Io(e),
    }
}

/// Blocking TCP connection to a switcher.
pub struct TcpTransport {
    stream: TcpStream,
    peer_addr: SocketAddr,
}

impl TcpTransport {
    /// Opens a connection to `host:port`.
    ///
    /// Every address the host resolves to is tried in order. With a
    /// `timeout`, it bounds each connect attempt as well as every later read
    /// and write.
    ///
    /// # Errors
    ///
    /// - `MatrixError::Timeout` if the last attempt timed out
    /// - `MatrixError::Io` if the host cannot be resolved or refuses
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self> {
        let mut last_error = None;

        for addr in (host, port).to_socket_addrs()? {
            let attempt = match timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => return Self::from_stream(stream, addr, timeout),
                Err(e) => {
                    tracing::debug!("connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(map_io_error(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}:{} did not resolve to any address", host, port),
            )
        })))
    }

    fn from_stream(
        stream: TcpStream,
        peer_addr: SocketAddr,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;
        stream.set_nodelay(true)?;
        Ok(Self { stream, peer_addr })
    }

    /// Writes a command and reads the reply.
    ///
    /// # Errors
    ///
    /// - `MatrixError::Timeout` if the read or write timed out
    /// - `MatrixError::Io` for other failures, including the device closing
    ///   the connection before replying
    pub fn send_receive(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        tracing::debug!("TX {:?}", String::from_utf8_lossy(data));
        self.stream.write_all(data).map_err(map_io_error)?;
        self.stream.flush().map_err(map_io_error)?;

        let mut buffer = vec![0u8; MAX_REPLY_SIZE];
        let size = self.stream.read(&mut buffer).map_err(map_io_error)?;
        if size == 0 {
            return Err(MatrixError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "device closed the connection before replying",
            )));
        }
        buffer.truncate(size);

        tracing::debug!("RX {:?}", String::from_utf8_lossy(&buffer));
        Ok(buffer)
    }

    /// Returns the address of the connected device.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Shuts the connection down and releases the socket.
    pub fn close(self) {
        // The peer may already be gone; the socket is released on drop either way.
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            tracing::debug!("shutdown of {} failed: {}", self.peer_addr, e);
        }
    }
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("peer_addr", &self.peer_addr)
            .field("local_addr", &self.stream.local_addr().ok())
            .finish()
    }
}
