//! Error type shared by every fallible array operation.

use std::error::Error;
use std::fmt;

/// Errors reported by [`DynArray`](crate::DynArray) and its
/// [`Cursor`](crate::Cursor).
///
/// No operation retries internally; a failed call leaves the array exactly
/// as it was before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayError {
    /// The allocator could not provide a buffer.
    AllocFailed {
        /// Size of the rejected request in bytes.
        requested: usize,
    },
    /// The array already holds its maximum number of slots.
    CapacityExhausted {
        /// The capacity at which growth was refused.
        capacity: usize,
    },
    /// An index did not refer to a live element.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// An inclusive `begin..=end` range was empty or ran past the end.
    InvalidRange {
        /// First index of the range.
        begin: usize,
        /// Last index of the range.
        end: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// The initial capacity was zero or above the element ceiling.
    InvalidCapacity {
        /// The requested initial capacity.
        capacity: usize,
        /// The element ceiling in effect.
        max: usize,
    },
    /// The first growth step could overflow the element ceiling.
    GrowthOverflow {
        /// The configured growth factor.
        growth_factor: f64,
        /// The requested initial capacity.
        capacity: usize,
        /// The element ceiling in effect.
        max: usize,
    },
    /// A cursor operation needed a yielded element, but `next` was never called.
    CursorNotStarted,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
            Self::CapacityExhausted { capacity } => {
                write!(f, "array capacity exhausted at {capacity} elements")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index (is {index}) should be < len (is {len})")
            }
            Self::InvalidRange { begin, end, len } => {
                write!(f, "invalid range {begin}..={end} for len {len}")
            }
            Self::InvalidCapacity { capacity, max } => {
                write!(f, "initial capacity {capacity} must be within 1..={max}")
            }
            Self::GrowthOverflow {
                growth_factor,
                capacity,
                max,
            } => {
                write!(
                    f,
                    "growth factor {growth_factor} with capacity {capacity} could overflow {max} elements"
                )
            }
            Self::CursorNotStarted => {
                write!(f, "cursor has not yielded an element yet")
            }
        }
    }
}

impl Error for ArrayError {}
