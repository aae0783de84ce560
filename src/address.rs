//! Translation between caller-facing indices and device addressing.
//!
//! Every index that enters the public API goes through [`Addressing`], which
//! checks it against the bounds of the active [`IndexMode`] and shifts it to
//! the device's zero-based form. Values coming back from the device are
//! shifted the other way with [`Addressing::to_external`].
//!
//! Indices are accepted as anything implementing [`IndexValue`]: all
//! primitive integers, plus strings holding an integer (surrounding
//! whitespace is ignored).
//!
//! # Example
//!
//! ```
//! use hdmi_matrix::{Addressing, IndexMode, Port};
//!
//! let addressing = Addressing::new(IndexMode::OneBased);
//!
//! let route = addressing.validate_and_convert(2, "3")?;
//! assert_eq!(route.input(), 1);
//! assert_eq!(route.output(), 2);
//!
//! assert_eq!(addressing.to_external(route.output(), Port::Output), 3);
//! # Ok::<(), hdmi_matrix::MatrixError>(())
//! ```

use crate::error::{MatrixError, Result};
use crate::topology::{IndexMode, INPUT_COUNT, OUTPUT_COUNT};

/// Which side of the matrix an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// A source feeding the matrix.
    Input,
    /// A sink driven by the matrix.
    Output,
}

impl Port {
    /// Number of ports on this side.
    pub fn count(self) -> usize {
        match self {
            Port::Input => INPUT_COUNT,
            Port::Output => OUTPUT_COUNT,
        }
    }

    /// Argument name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Port::Input => "input",
            Port::Output => "output",
        }
    }
}

/// A value that can be used as a port index.
pub trait IndexValue {
    /// Interprets the value as an integer index.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::InvalidArgument` if the value is not an integer.
    fn to_index(&self, parameter: &'static str) -> Result<i64>;
}

macro_rules! impl_index_value_lossless {
    ($($ty:ty),*) => {
        $(
            impl IndexValue for $ty {
                fn to_index(&self, _parameter: &'static str) -> Result<i64> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

// Values beyond i64 are still integers; they saturate and fail the range check.
macro_rules! impl_index_value_saturating {
    ($($ty:ty),*) => {
        $(
            impl IndexValue for $ty {
                fn to_index(&self, _parameter: &'static str) -> Result<i64> {
                    Ok(i64::try_from(*self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_index_value_lossless!(i8, i16, i32, i64, u8, u16, u32);
impl_index_value_saturating!(u64, usize, isize);

impl IndexValue for str {
    fn to_index(&self, parameter: &'static str) -> Result<i64> {
        self.trim().parse::<i64>().map_err(|_| {
            MatrixError::invalid_argument(
                parameter,
                format!("'{}' is not an integer index", self),
            )
        })
    }
}

impl IndexValue for String {
    fn to_index(&self, parameter: &'static str) -> Result<i64> {
        self.as_str().to_index(parameter)
    }
}

impl<T: IndexValue + ?Sized> IndexValue for &T {
    fn to_index(&self, parameter: &'static str) -> Result<i64> {
        (**self).to_index(parameter)
    }
}

/// A validated (input, output) pair in device addressing.
///
/// Only [`Addressing`] can build one, so both fields are always within
/// the matrix topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeRoute {
    input: usize,
    output: usize,
}

impl NativeRoute {
    /// Zero-based device input.
    pub fn input(self) -> usize {
        self.input
    }

    /// Zero-based device output.
    pub fn output(self) -> usize {
        self.output
    }
}

/// Converts indices between an [`IndexMode`] and device addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Addressing {
    mode: IndexMode,
}

impl Addressing {
    /// Creates a translator for the given mode.
    pub fn new(mode: IndexMode) -> Self {
        Self { mode }
    }

    /// Returns the active indexing mode.
    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Validates an (input, output) pair and converts it to device addressing.
    ///
    /// Both values are parsed before either is range-checked, so a
    /// non-numeric argument is always reported as `InvalidArgument`.
    ///
    /// # Errors
    ///
    /// - `MatrixError::InvalidArgument` if either value is not an integer
    /// - `MatrixError::OutOfRange` if either value is outside the bounds of
    ///   the active mode
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::{Addressing, IndexMode, MatrixError};
    ///
    /// let addressing = Addressing::new(IndexMode::ZeroBased);
    /// assert!(matches!(
    ///     addressing.validate_and_convert(4, 0),
    ///     Err(MatrixError::OutOfRange { .. })
    /// ));
    /// ```
    pub fn validate_and_convert(
        &self,
        input: impl IndexValue,
        output: impl IndexValue,
    ) -> Result<NativeRoute> {
        let input = input.to_index(Port::Input.name())?;
        let output = output.to_index(Port::Output.name())?;

        Ok(NativeRoute {
            input: self.to_native(input, Port::Input)?,
            output: self.to_native(output, Port::Output)?,
        })
    }

    /// Validates a single output index and converts it to device addressing.
    ///
    /// # Errors
    ///
    /// Same as [`validate_and_convert`](Self::validate_and_convert), for the
    /// output alone.
    pub fn validate_output(&self, output: impl IndexValue) -> Result<usize> {
        let output = output.to_index(Port::Output.name())?;
        self.to_native(output, Port::Output)
    }

    /// Converts a device index back to the caller-facing form.
    ///
    /// Inputs reported by the device are passed through even when they lie
    /// beyond [`INPUT_COUNT`]; outputs are always enumerated locally.
    pub fn to_external(self, native: usize, port: Port) -> usize {
        debug_assert!(port == Port::Input || native < OUTPUT_COUNT);
        native + self.mode.offset()
    }

    fn to_native(self, value: i64, port: Port) -> Result<usize> {
        let range = match port {
            Port::Input => self.mode.input_range(),
            Port::Output => self.mode.output_range(),
        };
        if !range.contains(&value) {
            return Err(MatrixError::out_of_range(
                port.name(),
                value,
                *range.start(),
                *range.end(),
            ));
        }
        // In range, so non-negative after removing the offset.
        Ok((value - *range.start()) as usize)
    }
}
