//! # HDMI Matrix Client
//!
//! A Rust driver for 4 x 8 HDMI matrix switchers controlled over a plain-text
//! TCP protocol (port 23).
//!
//! This is a **protocol-only** library: no discovery, no persisted state and
//! no background tasks. Each call produces exactly 1 request and 1 reply.
//! No automatic retries, caching, or reconnection.
//!
//! ## Features
//!
//! - **Route** any input to any output, with device confirmation
//! - **Query** the input feeding every output, or a single one
//! - **Zero- or one-based** port numbering, fixed per client
//! - **Manual or one-shot** connection handling
//! - **No panics** - all errors returned as `Result<T, MatrixError>`
//!
//! ## Quick Start
//!
//! ```no_run
//! use hdmi_matrix::{HdmiMatrix, IndexMode};
//!
//! fn main() -> hdmi_matrix::Result<()> {
//!     // Count ports as printed on the front panel
//!     let mut matrix = HdmiMatrix::new("192.168.1.60", IndexMode::OneBased);
//!
//!     // Show input 2 on output 5; connects and disconnects by itself
//!     if !matrix.simple_map_io(5, 2)? {
//!         println!("device confirmed a different route");
//!     }
//!
//!     // Read the whole routing table
//!     for (output, input) in matrix.simple_get_outputs()?.iter() {
//!         println!("output {} <- input {}", output, input);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Manual Sessions
//!
//! For several operations in a row, keep one connection open:
//!
//! ```no_run
//! # use hdmi_matrix::{HdmiMatrix, IndexMode};
//! let mut matrix = HdmiMatrix::new("192.168.1.60", IndexMode::ZeroBased);
//! matrix.connect()?;
//! for output in 0..8 {
//!     matrix.map_io(output, 0)?;
//! }
//! let input = matrix.get_output(3)?;
//! matrix.disconnect();
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```
//!
//! The `simple_*` operations refuse to run while a manual session is open.
//!
//! ## Error Handling
//!
//! ```no_run
//! use hdmi_matrix::{HdmiMatrix, IndexMode, MatrixError};
//!
//! let mut matrix = HdmiMatrix::new("192.168.1.60", IndexMode::OneBased);
//!
//! match matrix.simple_map_io(9, 1) {
//!     Ok(true) => println!("routed"),
//!     Ok(false) => println!("device disagreed"),
//!     Err(MatrixError::OutOfRange { parameter, min, max, .. }) => {
//!         println!("{} must be within {}..={}", parameter, min, max);
//!     }
//!     Err(e) if e.is_transport() => println!("device unreachable: {}", e),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use hdmi_matrix::{ClientConfig, HdmiMatrix, IndexMode};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new("matrix.local")
//!     .with_port(2323)                         // Custom port (default: 23)
//!     .with_index_mode(IndexMode::OneBased)    // Port numbering (default: zero-based)
//!     .with_timeout(Duration::from_secs(3));   // Timeout (default: none)
//! let matrix = HdmiMatrix::with_config(config);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: connects and disconnects at `info`,
//! every frame at `debug`, and unconfirmed routes at `warn`. Install a
//! subscriber in the application to see them.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod address;
mod client;
mod command;
mod error;
mod response;
mod session;
#[cfg(test)]
mod test_device;
mod topology;
mod transport;

// Public re-exports
pub use address::{Addressing, IndexValue, NativeRoute, Port};
pub use client::{ClientConfig, HdmiMatrix};
pub use command::{QueryOutputsCommand, RouteCommand, COMMAND_TABLE, QUERY_OUTPUTS};
pub use error::{MatrixError, Result};
pub use response::{OutputsReply, RouteAck, OUTPUTS_FILLER, ROUTE_ACK_LEN};
pub use session::{OutputMap, Session};
pub use topology::{IndexMode, INPUT_COUNT, OUTPUT_COUNT};
pub use transport::{TcpTransport, DEFAULT_PORT, MAX_REPLY_SIZE};
