use thiserror::Error;

/// An error when setting up a CCITT encoding
///
/// Only the geometry of the input and the encoder options are checked.
/// Once a [`crate::BitRow`] or [`crate::Bitmap`] exists, encoding cannot
/// fail, except by running out of output space, which panics.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FaxError {
    /// The backing buffer ends before the last pixel of a row
    #[error("row {row} needs {needed} bits, but the buffer only holds {available}")]
    RowOutOfBounds {
        /// Index of the first row that does not fit
        row: usize,
        /// Number of bits needed to cover that row
        needed: usize,
        /// Number of bits in the buffer
        available: usize,
    },
    /// Consecutive rows would overlap
    #[error("row stride of {stride} bits is smaller than the width of {width} pixels")]
    StrideTooSmall {
        /// The distance between the starts of two rows, in bits
        stride: usize,
        /// The number of pixels per row
        width: usize,
    },
    /// A Group 3 K factor of zero
    #[error("the K factor must be at least 1")]
    ZeroKFactor,
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
