// This module is the hub of the argument value model. It gathers the integer kinds that
// back every argument, the scalar and tensor payloads, the LambdaArgument sum type with its
// type naming, the overflow-checked multiplication used for tensor sizes, and the shared
// error type. Everything here is plain owned data: no interior mutability, no shared
// buffers, so arguments can be read from several threads at once.

//! Core argument model.
//!
//! # Key Components
//!
//! ## Integer kinds (`int_kind`)
//! - `IntWidth` / `IntKind` enumerate the eight backing integer types
//! - `BackingInt` ties the primitive types to their kind
//!
//! ## Scalars (`scalar`)
//! - `IntArgument` with logical precision and value-based equality
//!
//! ## Tensors (`tensor`)
//! - `TensorArgument` with row-major storage and lazily checked shape
//!
//! ## Arguments (`argument`)
//! - `LambdaArgument` closed over plain/encrypted scalars and tensors
//! - `argument_type_name` for diagnostics
//!
//! ## Size computation (`overflow`)
//! - `safe_unsigned_mul` reports overflow instead of wrapping

pub mod argument;
pub mod error;
pub mod int_kind;
pub mod overflow;
pub mod scalar;
pub mod tensor;

pub use argument::{argument_type_name, LambdaArgument};

pub use error::{ArgResult, ArgumentError};

pub use int_kind::{BackingInt, IntKind, IntWidth};

pub use overflow::{safe_unsigned_mul, Unsigned};

pub use scalar::IntArgument;

pub use tensor::{TensorArgument, TensorBuffer};
