//! x86-64 specific lowering.
//!
//! This module contains the pieces that depend on the target ABI:
//! - System V argument register and stack slot assignment
//! - Lowering of scalar and tensor arguments into 64-bit words

pub mod calling_convention;
pub mod marshal;

pub use calling_convention::{
    ArgAttribute,
    ArgLocation,
    CCAssigner,
    CCAssignment,
    GpReg,
    SysVAssigner as CallingConvention,
};

pub use marshal::{
    lower_arguments,
    lower_arguments_with,
    lower_call,
    CallFrame,
    LoweredWord,
    WordKind,
};
