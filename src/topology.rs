//! Matrix topology and indexing mode.
//!
//! The supported switcher has a fixed 4 x 8 layout: [`INPUT_COUNT`] sources
//! that can each be routed to any of [`OUTPUT_COUNT`] sinks. On the wire the
//! device always uses its own zero-based addressing; callers pick how they
//! want to count ports with [`IndexMode`].
//!
//! | Mode | Inputs | Outputs |
//! |------|:------:|:-------:|
//! | [`IndexMode::ZeroBased`] | 0..=3 | 0..=7 |
//! | [`IndexMode::OneBased`] | 1..=4 | 1..=8 |
//!
//! # Example
//!
//! ```
//! use hdmi_matrix::IndexMode;
//!
//! assert_eq!(IndexMode::ZeroBased.input_range(), 0..=3);
//! assert_eq!(IndexMode::OneBased.output_range(), 1..=8);
//! ```

use std::ops::RangeInclusive;

/// Number of matrix inputs.
pub const INPUT_COUNT: usize = 4;

/// Number of matrix outputs.
pub const OUTPUT_COUNT: usize = 8;

/// How port indices are counted in the public API.
///
/// Fixed for the lifetime of a client. Device communication is always
/// zero-based regardless of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexMode {
    /// Ports are numbered from 0, matching the device.
    #[default]
    ZeroBased,
    /// Ports are numbered from 1, as printed on the front panel.
    OneBased,
}

impl IndexMode {
    /// Returns the mode for a "zero index" flag.
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::IndexMode;
    ///
    /// assert_eq!(IndexMode::from_zero_index(true), IndexMode::ZeroBased);
    /// assert_eq!(IndexMode::from_zero_index(false), IndexMode::OneBased);
    /// ```
    pub fn from_zero_index(zero_index: bool) -> Self {
        if zero_index {
            IndexMode::ZeroBased
        } else {
            IndexMode::OneBased
        }
    }

    /// Difference between a caller-facing index and the device index.
    pub fn offset(self) -> usize {
        match self {
            IndexMode::ZeroBased => 0,
            IndexMode::OneBased => 1,
        }
    }

    /// Accepted input indices in this mode.
    pub fn input_range(self) -> RangeInclusive<i64> {
        self.range(INPUT_COUNT)
    }

    /// Accepted output indices in this mode.
    pub fn output_range(self) -> RangeInclusive<i64> {
        self.range(OUTPUT_COUNT)
    }

    fn range(self, count: usize) -> RangeInclusive<i64> {
        let min = self.offset() as i64;
        min..=min + count as i64 - 1
    }
}

impl std::fmt::Display for IndexMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexMode::ZeroBased => write!(f, "zero-based"),
            IndexMode::OneBased => write!(f, "one-based"),
        }
    }
}
