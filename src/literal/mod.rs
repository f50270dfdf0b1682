//! Textual literals for arguments and parameter types.
//!
//! This module provides a compact syntax for writing arguments and
//! signatures in tests and on the command line.
//!
//! # Argument literals
//!
//! ```text
//! u8:5                    plaintext uint8_t scalar
//! eu8:5                   encrypted uint8_t scalar
//! u8p4:15                 uint8_t scalar with precision 4
//! i16[3]:-1,0,1           plaintext int16_t tensor of shape [3]
//! eu32[2x3]:1,2,3,4,5,6   encrypted uint32_t tensor of shape [2, 3]
//! ```
//!
//! # Type literals
//!
//! ```text
//! eint<8>  esint<8>  int<8>  sint<8>  tensor<2x?xeint<8>>
//! ```
//!
//! A signature is a comma separated list of types.

mod parser;

use crate::core::{ArgResult, LambdaArgument};
use crate::types::{FunctionSignature, TypeDescriptor};

/// Parse a single argument literal.
pub fn parse_argument(text: &str) -> ArgResult<LambdaArgument> {
    parser::Parser::new(text).parse_argument_literal()
}

/// Parse a single type literal.
pub fn parse_type(text: &str) -> ArgResult<TypeDescriptor> {
    parser::Parser::new(text).parse_type_literal()
}

/// Parse a comma separated list of types. An empty string is an empty signature.
pub fn parse_signature(text: &str) -> ArgResult<FunctionSignature> {
    parser::Parser::new(text).parse_signature_literal()
}
