//! Device reply decoding.
//!
//! Replies are short ASCII strings, sometimes padded with NUL bytes and
//! whitespace, which are discarded before decoding.
//!
//! # Route acknowledgement
//!
//! | Position | Meaning |
//! |----------|---------|
//! | 0 | echo / status, ignored |
//! | 1 | confirmed device output, **one-based** digit |
//! | 2 | confirmed device input, zero-based digit |
//!
//! The one-based output digit is how the device reports it, whatever
//! [`IndexMode`](crate::IndexMode) the client uses.
//!
//! # Output query reply
//!
//! One zero-based input digit per output, separated by `s` filler characters:
//! `0s1s2s3s0s1s2s3` means output 4 shows input 0.
//!
//! # Example
//!
//! ```
//! use hdmi_matrix::{OutputsReply, RouteAck};
//!
//! let ack = RouteAck::from_bytes(b"a31\0\0")?;
//! assert_eq!(ack.wire_output(), 3);
//! assert_eq!(ack.input(), 1);
//!
//! let reply = OutputsReply::from_bytes(b"0s1s2s3s0s1s2s3\r\n")?;
//! assert_eq!(reply.input_for(4), Some(0));
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```

use crate::address::NativeRoute;
use crate::error::{MatrixError, Result};
use crate::topology::OUTPUT_COUNT;

/// Filler character separating the digits of an output query reply.
pub const OUTPUTS_FILLER: u8 = b's';

/// Length of a route acknowledgement after cleanup.
pub const ROUTE_ACK_LEN: usize = 3;

/// Drops NUL bytes and surrounding whitespace.
fn clean(data: &[u8]) -> Vec<u8> {
    let bytes: Vec<u8> = data.iter().copied().filter(|&b| b != 0).collect();
    bytes.trim_ascii().to_vec()
}

fn digit(byte: u8, what: &str) -> Result<usize> {
    char::from(byte)
        .to_digit(10)
        .map(|d| d as usize)
        .ok_or_else(|| {
            MatrixError::invalid_response(format!(
                "{} is not a digit: {:?}",
                what,
                char::from(byte)
            ))
        })
}

/// Decoded acknowledgement of a route command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAck {
    wire_output: usize,
    input: usize,
}

impl RouteAck {
    /// Parses a route acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::InvalidResponse` if fewer than
    /// [`ROUTE_ACK_LEN`] characters remain after cleanup or if position
    /// 1 or 2 does not hold a digit.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let reply = clean(data);
        if reply.len() < ROUTE_ACK_LEN {
            return Err(MatrixError::invalid_response(format!(
                "route acknowledgement too short: expected at least {} characters, got {:?}",
                ROUTE_ACK_LEN,
                String::from_utf8_lossy(&reply)
            )));
        }

        Ok(Self {
            wire_output: digit(reply[1], "confirmed output")?,
            input: digit(reply[2], "confirmed input")?,
        })
    }

    /// Confirmed output, one-based as sent by the device.
    pub fn wire_output(&self) -> usize {
        self.wire_output
    }

    /// Confirmed input in device addressing.
    pub fn input(&self) -> usize {
        self.input
    }

    /// Returns whether the device confirmed exactly the requested route.
    pub fn confirms(&self, route: NativeRoute) -> bool {
        self.wire_output == route.output() + 1 && self.input == route.input()
    }
}

/// Decoded reply to the output query, in device addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputsReply {
    inputs: [usize; OUTPUT_COUNT],
}

impl OutputsReply {
    /// Parses an output query reply.
    ///
    /// Characters beyond the first [`OUTPUT_COUNT`] digits are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::InvalidResponse` if the reply carries fewer
    /// digits than there are outputs, or a non-digit character.
    ///
    /// Digits are passed through as reported; they are not checked against
    /// [`INPUT_COUNT`](crate::INPUT_COUNT).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let reply: Vec<u8> = clean(data)
            .into_iter()
            .filter(|&b| b != OUTPUTS_FILLER)
            .collect();
        if reply.len() < OUTPUT_COUNT {
            return Err(MatrixError::invalid_response(format!(
                "output query reply too short: expected {} entries, got {:?}",
                OUTPUT_COUNT,
                String::from_utf8_lossy(&reply)
            )));
        }

        let mut inputs = [0usize; OUTPUT_COUNT];
        for (output, &byte) in reply.iter().take(OUTPUT_COUNT).enumerate() {
            inputs[output] = digit(byte, "routed input")?;
        }

        Ok(Self { inputs })
    }

    /// Device input routed to the given device output.
    pub fn input_for(&self, output: usize) -> Option<usize> {
        self.inputs.get(output).copied()
    }

    /// Iterates `(device output, device input)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inputs.iter().copied().enumerate()
    }
}
