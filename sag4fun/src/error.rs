//! Errors.

use thiserror::Error;

/// Result type of the permutation network.
pub type Result<T> = std::result::Result<T, Error>;

/// Input-validation contract violations.
///
/// Every variant is detected before any stage work begins, so an error never leaves a half-built container behind.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("width {width} is not a power of two usable by the network")]
    InvalidWidth { width: usize },

    #[error("depth {depth} does not divide width {width} into a grid")]
    InvalidDepth { width: usize, depth: usize },

    #[error("expected {expected} symbols, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("cannot {op} a container at depth {depth}")]
    StructuralPrecondition { op: &'static str, depth: usize },

    #[error("{op}: expected {expected} cells, found {found}")]
    DimensionMismatch { op: &'static str, expected: usize, found: usize },

    #[error("no mask has been loaded")]
    NotLoaded,

    #[error("position {position} holds {symbol:?}, which is not a bit")]
    NotABit { position: usize, symbol: char },

    #[error("position {position} is out of bounds for width {width}")]
    OutOfBounds { position: usize, width: usize },
}
