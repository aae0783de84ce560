//! Manually managed connection to a switcher.
//!
//! A [`Session`] is either disconnected or owns exactly one open socket.
//! Routing and query operations need an open socket and fail with
//! [`MatrixError::NotConnected`] otherwise.
//!
//! ```text
//! Disconnected --connect()--> Connected --disconnect()--> Disconnected
//! ```
//!
//! Both transitions are idempotent. A failed operation leaves the session
//! connected; closing it stays the caller's job.
//!
//! # Example
//!
//! ```no_run
//! use hdmi_matrix::{ClientConfig, IndexMode, Session};
//!
//! let mut session = Session::new(
//!     ClientConfig::new("192.168.1.60").with_index_mode(IndexMode::OneBased),
//! );
//! session.connect()?;
//!
//! if !session.map_io(3, 2)? {
//!     eprintln!("device confirmed a different route");
//! }
//! for (output, input) in session.get_outputs()?.iter() {
//!     println!("output {} <- input {}", output, input);
//! }
//!
//! session.disconnect();
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```

use std::collections::BTreeMap;

use crate::address::{Addressing, IndexValue, Port};
use crate::client::ClientConfig;
use crate::command::{QueryOutputsCommand, RouteCommand};
use crate::error::{MatrixError, Result};
use crate::response::{OutputsReply, RouteAck};
use crate::topology::IndexMode;
use crate::transport::TcpTransport;

/// Snapshot of which input feeds every output.
///
/// Keys and values follow the session's [`IndexMode`]. Built fresh from the
/// device on every query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputMap {
    routes: BTreeMap<usize, usize>,
}

impl OutputMap {
    /// Input routed to `output`, if the output exists.
    pub fn get(&self, output: usize) -> Option<usize> {
        self.routes.get(&output).copied()
    }

    /// Iterates `(output, input)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.routes.iter().map(|(&output, &input)| (output, input))
    }

    /// Number of outputs in the snapshot.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Consumes the snapshot, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<usize, usize> {
        self.routes
    }
}

impl FromIterator<(usize, usize)> for OutputMap {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

/// Connection lifecycle and protocol operations for one switcher.
///
/// Operations that touch the socket take `&mut self`; share a session
/// between threads behind a `Mutex`.
pub struct Session {
    config: ClientConfig,
    addressing: Addressing,
    transport: Option<TcpTransport>,
}

impl Session {
    /// Creates a disconnected session.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            addressing: Addressing::new(config.index_mode),
            config,
            transport: None,
        }
    }

    /// Returns the configuration the session was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the active indexing mode.
    pub fn index_mode(&self) -> IndexMode {
        self.addressing.mode()
    }

    /// Returns whether a socket is open.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Opens the connection. Does nothing if already connected.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Io` or `MatrixError::Timeout` if the device
    /// cannot be reached; the session stays disconnected.
    pub fn connect(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Ok(());
        }

        let transport =
            TcpTransport::connect(&self.config.host, self.config.port, self.config.timeout)?;
        tracing::info!("connected to {}", transport.peer_addr());
        self.transport = Some(transport);
        Ok(())
    }

    /// Closes the connection. Does nothing if already disconnected.
    pub fn disconnect(&mut self) {
        if let Some(transport) = self.transport.take() {
            tracing::info!("disconnecting from {}", transport.peer_addr());
            transport.close();
        }
    }

    /// Routes `input` to `output`.
    ///
    /// Returns `Ok(true)` if the device acknowledged exactly this route and
    /// `Ok(false)` if it acknowledged a different one.
    ///
    /// # Errors
    ///
    /// - `MatrixError::NotConnected` if the session is not open
    /// - `MatrixError::InvalidArgument` / `MatrixError::OutOfRange` for bad
    ///   indices
    /// - `MatrixError::InvalidResponse` if the acknowledgement is malformed
    /// - transport errors
    pub fn map_io(&mut self, output: impl IndexValue, input: impl IndexValue) -> Result<bool> {
        let transport = self.transport.as_mut().ok_or(MatrixError::NotConnected)?;
        let route = self.addressing.validate_and_convert(input, output)?;
        let command = RouteCommand::new(route);

        let reply = transport.send_receive(command.to_bytes())?;
        let ack = RouteAck::from_bytes(&reply)?;

        let confirmed = ack.confirms(route);
        if !confirmed {
            tracing::warn!(
                "route {} sent for device input {} -> output {}, device confirmed input {} -> output {} (one-based)",
                command.code(),
                route.input(),
                route.output(),
                ack.input(),
                ack.wire_output()
            );
        }
        Ok(confirmed)
    }

    /// Reads the input currently routed to every output.
    ///
    /// # Errors
    ///
    /// - `MatrixError::NotConnected` if the session is not open
    /// - `MatrixError::InvalidResponse` if the reply is malformed
    /// - transport errors
    pub fn get_outputs(&mut self) -> Result<OutputMap> {
        let transport = self.transport.as_mut().ok_or(MatrixError::NotConnected)?;
        let reply = transport.send_receive(QueryOutputsCommand.to_bytes())?;
        let reply = OutputsReply::from_bytes(&reply)?;

        let addressing = self.addressing;
        Ok(reply
            .iter()
            .map(|(output, input)| {
                (
                    addressing.to_external(output, Port::Output),
                    addressing.to_external(input, Port::Input),
                )
            })
            .collect())
    }

    /// Reads the input currently routed to `output`.
    ///
    /// # Errors
    ///
    /// Same as [`get_outputs`](Self::get_outputs), plus
    /// `MatrixError::InvalidArgument` / `MatrixError::OutOfRange` for a bad
    /// output index.
    pub fn get_output(&mut self, output: impl IndexValue) -> Result<usize> {
        if self.transport.is_none() {
            return Err(MatrixError::NotConnected);
        }
        let native = self.addressing.validate_output(output)?;
        let external = self.addressing.to_external(native, Port::Output);

        self.get_outputs()?.get(external).ok_or_else(|| {
            let range = self.addressing.mode().output_range();
            MatrixError::out_of_range(
                Port::Output.name(),
                external as i64,
                *range.start(),
                *range.end(),
            )
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish()
    }
}
