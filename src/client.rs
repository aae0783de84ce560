//! High-level client for HDMI matrix switchers.
//!
//! This module provides the [`HdmiMatrix`] struct, which is the primary
//! interface of the crate, and its [`ClientConfig`].
//!
//! # Overview
//!
//! The client can be used in two ways, which must not be mixed:
//!
//! - **Manual session** - call [`connect`](HdmiMatrix::connect), any number
//!   of [`map_io`](HdmiMatrix::map_io) / [`get_outputs`](HdmiMatrix::get_outputs)
//!   / [`get_output`](HdmiMatrix::get_output), then
//!   [`disconnect`](HdmiMatrix::disconnect)
//! - **One-shot** - the `simple_*` operations open a connection, run one
//!   operation and close the connection again, even when the operation
//!   fails. They return [`MatrixError::SessionMisuse`] while a manual
//!   session is open.
//!
//! # Example
//!
//! ```no_run
//! use hdmi_matrix::{HdmiMatrix, IndexMode};
//!
//! let mut matrix = HdmiMatrix::new("192.168.1.60", IndexMode::OneBased);
//!
//! // One-shot
//! assert!(matrix.simple_map_io(8, 1)?);
//! let input = matrix.simple_get_output(8)?;
//!
//! // Manual session
//! matrix.connect()?;
//! for output in 1..=8 {
//!     matrix.map_io(output, 2)?;
//! }
//! let outputs = matrix.get_outputs()?;
//! matrix.disconnect();
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```
//!
//! # Configuration
//!
//! The [`ClientConfig`] struct allows customization of:
//! - Device port (default 23)
//! - Indexing mode (default zero-based)
//! - Communication timeout (default none)

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::address::IndexValue;
use crate::error::{MatrixError, Result};
use crate::session::{OutputMap, Session};
use crate::topology::IndexMode;
use crate::transport::DEFAULT_PORT;

/// Configuration for creating a matrix client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    /// Device hostname or IP address.
    pub host: String,
    /// Device control port.
    pub port: u16,
    /// How port indices are counted in the API.
    pub index_mode: IndexMode,
    /// Connect/read/write timeout. `None` blocks until the OS gives up.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for `host` with default settings.
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::{ClientConfig, IndexMode, DEFAULT_PORT};
    ///
    /// let config = ClientConfig::new("192.168.1.60");
    /// assert_eq!(config.port, DEFAULT_PORT);
    /// assert_eq!(config.index_mode, IndexMode::ZeroBased);
    /// assert!(config.timeout.is_none());
    /// ```
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            index_mode: IndexMode::default(),
            timeout: None,
        }
    }

    /// Sets a custom device port (default is 23).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the indexing mode (default is zero-based).
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::{ClientConfig, IndexMode};
    ///
    /// let config = ClientConfig::new("matrix.local").with_index_mode(IndexMode::OneBased);
    /// assert_eq!(config.index_mode, IndexMode::OneBased);
    /// ```
    pub fn with_index_mode(mut self, index_mode: IndexMode) -> Self {
        self.index_mode = index_mode;
        self
    }

    /// Sets a timeout for connect, read and write (default is none).
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::ClientConfig;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new("matrix.local").with_timeout(Duration::from_secs(3));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Connects a [`Session`] for the lifetime of the guard.
struct AutoSession<'a> {
    session: &'a mut Session,
}

impl<'a> AutoSession<'a> {
    fn open(session: &'a mut Session, operation: &'static str) -> Result<Self> {
        if session.is_connected() {
            return Err(MatrixError::session_misuse(operation));
        }
        session.connect()?;
        Ok(Self { session })
    }
}

impl Deref for AutoSession<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for AutoSession<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for AutoSession<'_> {
    fn drop(&mut self) {
        self.session.disconnect();
    }
}

/// Client for one HDMI matrix switcher.
///
/// Wraps a [`Session`] and adds self-managing `simple_*` operations.
/// Each protocol operation produces exactly 1 request and 1 reply.
/// No automatic retries, caching, or reconnection.
#[derive(Debug)]
pub struct HdmiMatrix {
    session: Session,
}

impl HdmiMatrix {
    /// Creates a disconnected client for `hostname` on the default port.
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::{HdmiMatrix, IndexMode};
    ///
    /// let matrix = HdmiMatrix::new("192.168.1.60", IndexMode::ZeroBased);
    /// assert!(!matrix.is_connected());
    /// ```
    pub fn new(hostname: impl Into<String>, index_mode: IndexMode) -> Self {
        Self::with_config(ClientConfig::new(hostname).with_index_mode(index_mode))
    }

    /// Creates a disconnected client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.session.config()
    }

    /// Returns the active indexing mode.
    pub fn index_mode(&self) -> IndexMode {
        self.session.index_mode()
    }

    /// Returns whether a manual session is open.
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Opens a manual session. See [`Session::connect`].
    pub fn connect(&mut self) -> Result<()> {
        self.session.connect()
    }

    /// Closes the manual session. See [`Session::disconnect`].
    pub fn disconnect(&mut self) {
        self.session.disconnect()
    }

    /// Routes `input` to `output` on the open session. See [`Session::map_io`].
    pub fn map_io(&mut self, output: impl IndexValue, input: impl IndexValue) -> Result<bool> {
        self.session.map_io(output, input)
    }

    /// Reads all routes on the open session. See [`Session::get_outputs`].
    pub fn get_outputs(&mut self) -> Result<OutputMap> {
        self.session.get_outputs()
    }

    /// Reads one route on the open session. See [`Session::get_output`].
    pub fn get_output(&mut self, output: impl IndexValue) -> Result<usize> {
        self.session.get_output(output)
    }

    /// Connects, routes `input` to `output`, and disconnects.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::SessionMisuse` if a manual session is open,
    /// otherwise the errors of [`connect`](Self::connect) and
    /// [`map_io`](Self::map_io).
    pub fn simple_map_io(
        &mut self,
        output: impl IndexValue,
        input: impl IndexValue,
    ) -> Result<bool> {
        AutoSession::open(&mut self.session, "simple_map_io")?.map_io(output, input)
    }

    /// Connects, reads all routes, and disconnects.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::SessionMisuse` if a manual session is open,
    /// otherwise the errors of [`connect`](Self::connect) and
    /// [`get_outputs`](Self::get_outputs).
    pub fn simple_get_outputs(&mut self) -> Result<OutputMap> {
        AutoSession::open(&mut self.session, "simple_get_outputs")?.get_outputs()
    }

    /// Connects, reads the route of one output, and disconnects.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::SessionMisuse` if a manual session is open,
    /// otherwise the errors of [`connect`](Self::connect) and
    /// [`get_output`](Self::get_output).
    pub fn simple_get_output(&mut self, output: impl IndexValue) -> Result<usize> {
        AutoSession::open(&mut self.session, "simple_get_output")?.get_output(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_device::SimulatedDevice;

    fn matrix(device: &SimulatedDevice, mode: IndexMode) -> HdmiMatrix {
        HdmiMatrix::with_config(
            ClientConfig::new("127.0.0.1")
                .with_port(device.port())
                .with_index_mode(mode)
                .with_timeout(Duration::from_secs(5)),
        )
    }

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::new("192.168.1.60");

        assert_eq!(config.host, "192.168.1.60");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.index_mode, IndexMode::ZeroBased);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_client_config_builders() {
        let config = ClientConfig::new("matrix.local")
            .with_port(2323)
            .with_index_mode(IndexMode::OneBased)
            .with_timeout(Duration::from_millis(750));

        assert_eq!(config.port, 2323);
        assert_eq!(config.index_mode, IndexMode::OneBased);
        assert_eq!(config.timeout, Some(Duration::from_millis(750)));
    }

    #[test]
    fn test_new_sets_mode() {
        let matrix = HdmiMatrix::new("10.0.0.5", IndexMode::OneBased);
        assert_eq!(matrix.index_mode(), IndexMode::OneBased);
        assert_eq!(matrix.config().host, "10.0.0.5");
        assert!(!matrix.is_connected());
    }

    #[test]
    fn test_simple_map_io_round_trip() {
        let device = SimulatedDevice::matrix();
        let mut matrix = matrix(&device, IndexMode::OneBased);

        assert!(matrix.simple_map_io(8, 4).unwrap());
        assert!(!matrix.is_connected());
        assert_eq!(matrix.simple_get_output(8).unwrap(), 4);
        assert!(!matrix.is_connected());

        let outputs = matrix.simple_get_outputs().unwrap();
        assert_eq!(outputs.len(), 8);
        assert_eq!(outputs.get(8), Some(4));
        assert_eq!(outputs.get(1), Some(1));

        device.wait_closed(3);
        assert_eq!(device.accepted(), 3);
        assert_eq!(device.received(), vec!["a1A", "Bc", "Bc"]);
    }

    #[test]
    fn test_simple_operations_reject_manual_session() {
        let device = SimulatedDevice::matrix();
        let mut matrix = matrix(&device, IndexMode::ZeroBased);
        matrix.connect().unwrap();

        assert!(matches!(
            matrix.simple_map_io(0, 0),
            Err(MatrixError::SessionMisuse { operation: "simple_map_io" })
        ));
        assert!(matches!(
            matrix.simple_get_outputs(),
            Err(MatrixError::SessionMisuse { operation: "simple_get_outputs" })
        ));
        assert!(matches!(
            matrix.simple_get_output(0),
            Err(MatrixError::SessionMisuse { operation: "simple_get_output" })
        ));

        // The manual session is untouched
        assert!(matrix.is_connected());
        assert!(matrix.map_io(0, 0).unwrap());
        matrix.disconnect();
        assert!(!matrix.is_connected());
    }

    #[test]
    fn test_simple_disconnects_after_failure() {
        let device = SimulatedDevice::fixed(b"garbage");
        let mut matrix = matrix(&device, IndexMode::ZeroBased);

        assert!(matches!(
            matrix.simple_get_outputs(),
            Err(MatrixError::InvalidResponse { .. })
        ));
        assert!(!matrix.is_connected());

        assert!(matches!(
            matrix.simple_map_io(8, 0),
            Err(MatrixError::OutOfRange { .. })
        ));
        assert!(!matrix.is_connected());

        device.wait_closed(2);
    }

    #[test]
    fn test_simple_disconnects_after_transport_failure() {
        let device = SimulatedDevice::start(|_| None);
        let mut matrix = matrix(&device, IndexMode::ZeroBased);

        let err = matrix.simple_get_output(3).unwrap_err();
        assert!(err.is_transport(), "{err}");
        assert!(!matrix.is_connected());

        // The client is reusable afterwards
        let err = matrix.simple_map_io(3, 1).unwrap_err();
        assert!(err.is_transport(), "{err}");
        assert!(!matrix.is_connected());
    }

    #[test]
    fn test_simple_connect_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut matrix = HdmiMatrix::with_config(ClientConfig::new("127.0.0.1").with_port(port));

        assert!(matrix.simple_get_outputs().unwrap_err().is_transport());
        assert!(!matrix.is_connected());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde() {
        let config = ClientConfig::new("matrix.local").with_index_mode(IndexMode::OneBased);
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
