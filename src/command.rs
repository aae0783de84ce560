//! Device command encoding.
//!
//! The switcher understands two kinds of request, both plain ASCII with no
//! terminator:
//!
//! | Request | Bytes | Reply |
//! |---------|-------|-------|
//! | Route input to output | 3-char code from [`COMMAND_TABLE`], e.g. `a12` | route acknowledgement |
//! | Query all outputs | `Bc` | one digit per output, `s`-separated |
//!
//! Route codes carry no visible structure; they are looked up by device
//! (input, output) pair.
//!
//! # Example
//!
//! ```
//! use hdmi_matrix::{Addressing, IndexMode, RouteCommand};
//!
//! let route = Addressing::new(IndexMode::ZeroBased).validate_and_convert(1, 2)?;
//! let cmd = RouteCommand::new(route);
//! assert_eq!(cmd.code(), "a12");
//! assert_eq!(cmd.to_bytes(), b"a12");
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```

use crate::address::NativeRoute;
use crate::topology::{INPUT_COUNT, OUTPUT_COUNT};

/// Route codes indexed by `[device input][device output]`.
pub static COMMAND_TABLE: [[&str; OUTPUT_COUNT]; INPUT_COUNT] = [
    ["a09", "a19", "a17", "a50", "a5E", "a47", "a18", "a0A"],
    ["a1D", "a1B", "a12", "a55", "a06", "a07", "a44", "a1E"],
    ["a1F", "a11", "a59", "a48", "a05", "a40", "a0F", "a0E"],
    ["a0D", "a15", "a08", "a4A", "a03", "a02", "a51", "a1A"],
];

/// Request asking the device for the input routed to every output.
pub const QUERY_OUTPUTS: &str = "Bc";

/// Command routing one input to one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCommand {
    route: NativeRoute,
}

impl RouteCommand {
    /// Creates a route command for a validated pair.
    pub fn new(route: NativeRoute) -> Self {
        Self { route }
    }

    /// Returns the pair this command routes.
    pub fn route(self) -> NativeRoute {
        self.route
    }

    /// Returns the device code for this route.
    pub fn code(self) -> &'static str {
        // NativeRoute is bounded by the same constants as the table.
        COMMAND_TABLE[self.route.input()][self.route.output()]
    }

    /// Serializes the command for transmission.
    pub fn to_bytes(self) -> &'static [u8] {
        self.code().as_bytes()
    }
}

/// Command querying the full output mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOutputsCommand;

impl QueryOutputsCommand {
    /// Serializes the command for transmission.
    pub fn to_bytes(self) -> &'static [u8] {
        QUERY_OUTPUTS.as_bytes()
    }
}
