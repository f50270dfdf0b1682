// This module defines the error type shared by the whole crate using the thiserror crate.
// ArgumentError covers every expected failure: element-count products that do not fit
// the target integer type, negative (dynamic) tensor dimensions, invalid encrypted integer
// widths, tensors whose storage does not match their shape, signature arity and type
// mismatches, and literal parsing problems. Each variant carries the operands or position
// needed to diagnose the failure. ArgResult<T> is the convenience alias used throughout.

//! Error types for argument construction, inspection and lowering.

use thiserror::Error;

use super::int_kind::IntKind;

/// Main error type for the argument model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Multiplying value {accumulator} with {factor} would cause an overflow")]
    Overflow {
        accumulator: u128,
        factor: u128,
    },

    #[error("Dimension {index} has negative size {size}")]
    NegativeDimension {
        index: usize,
        size: i64,
    },

    #[error("Cannot construct encrypted integer type of width {width}: {reason}")]
    TypeConstruction {
        width: u32,
        reason: String,
    },

    #[error("Tensor holds {actual} values but its shape requires {expected}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("Expected {expected} arguments, got {actual}")]
    ArityMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("Argument #{index} has type {actual}, expected {expected}")]
    SignatureMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Value {value} does not fit into {kind}")]
    ValueOutOfRange {
        value: i128,
        kind: IntKind,
    },

    #[error("Parse error at position {pos}: {reason}")]
    Parse {
        pos: usize,
        reason: String,
    },
}

/// Result type alias for argument operations.
pub type ArgResult<T> = Result<T, ArgumentError>;
