//! lambda-args - argument values for compiled FHE functions.
//!
//! This crate models the values handed to a compiled numeric or
//! homomorphic-encryption function: integer scalars with a logical precision,
//! their encrypted counterparts, and row-major tensors of either.
//!
//! # Primary Usage
//!
//! ```
//! use lambda_args::{LambdaArgument, TensorArgument};
//!
//! let x = LambdaArgument::encrypted_int(5u8);
//! let t = LambdaArgument::tensor(TensorArgument::from_slice(&[1u32, 2, 3, 4, 5, 6], &[2, 3]));
//!
//! assert_eq!(x.type_name(), "encrypted uint8_t");
//! assert_eq!(t.type_name(), "tensor<uint32_t>");
//! assert_eq!(t.as_tensor().unwrap().num_elements().unwrap(), 6);
//! ```
//!
//! # Architecture
//!
//! - [`core`] - Argument model (kinds, scalars, tensors, type names, overflow checks)
//! - [`types`] - Parameter type descriptors and signature checking
//! - [`x64`] - System V lowering of arguments into machine words
//! - [`literal`] - Text syntax for arguments and types

pub mod core;
pub mod literal;
pub mod types;
pub mod x64;

pub use crate::core::{
    // Argument model
    argument_type_name, IntArgument, LambdaArgument, TensorArgument, TensorBuffer,
    // Integer kinds
    BackingInt, IntKind, IntWidth,
    // Size computation
    safe_unsigned_mul, Unsigned,
    // Errors
    ArgResult, ArgumentError,
};
pub use types::{EncryptedIntegerType, FunctionSignature, TypeDescriptor};
