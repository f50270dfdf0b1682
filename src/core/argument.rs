// This module defines LambdaArgument, the closed set of values that can be passed to a
// compiled function: plaintext integer scalars, encrypted integer scalars, and tensors of
// either. Encrypted variants share their payload type with the plaintext ones and differ
// only in the tag, which drives dispatch and diagnostics. argument_type_name maps every
// variant and backing kind to its descriptive name ("uint8_t", "encrypted int16_t",
// "tensor<uint32_t>", "tensor<encrypted int64_t>") through an exhaustive match, so there
// is no unmatched case to handle at runtime. Equality follows the payloads: scalars
// compare by value across tags and kinds, tensors by shape and values.

//! Argument values passed to compiled functions.

use std::fmt;

use super::int_kind::{BackingInt, IntKind};
use super::scalar::IntArgument;
use super::tensor::TensorArgument;

/// A value that can be passed to a compiled function.
#[derive(Debug, Clone)]
pub enum LambdaArgument {
    /// Plaintext integer scalar.
    Int(IntArgument),
    /// Integer scalar standing for the content of an encrypted value.
    EInt(IntArgument),
    /// Plaintext integer tensor.
    Tensor(TensorArgument),
    /// Tensor of encrypted integers.
    ETensor(TensorArgument),
}

impl LambdaArgument {
    /// Plaintext scalar with full precision.
    pub fn int<T: BackingInt>(value: T) -> Self {
        LambdaArgument::Int(IntArgument::new(value))
    }

    pub fn int_with_precision<T: BackingInt>(value: T, precision: u32) -> Self {
        LambdaArgument::Int(IntArgument::with_precision(value, precision))
    }

    /// Encrypted scalar with full precision.
    pub fn encrypted_int<T: BackingInt>(value: T) -> Self {
        LambdaArgument::EInt(IntArgument::new(value))
    }

    pub fn encrypted_int_with_precision<T: BackingInt>(value: T, precision: u32) -> Self {
        LambdaArgument::EInt(IntArgument::with_precision(value, precision))
    }

    pub fn tensor(tensor: TensorArgument) -> Self {
        LambdaArgument::Tensor(tensor)
    }

    pub fn encrypted_tensor(tensor: TensorArgument) -> Self {
        LambdaArgument::ETensor(tensor)
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, LambdaArgument::EInt(_) | LambdaArgument::ETensor(_))
    }

    pub fn is_tensor(&self) -> bool {
        matches!(self, LambdaArgument::Tensor(_) | LambdaArgument::ETensor(_))
    }

    /// Backing kind of the scalar or of the tensor elements.
    pub fn element_kind(&self) -> IntKind {
        match self {
            LambdaArgument::Int(arg) | LambdaArgument::EInt(arg) => arg.kind(),
            LambdaArgument::Tensor(t) | LambdaArgument::ETensor(t) => t.element_kind(),
        }
    }

    /// Scalar payload, if this is a scalar argument.
    pub fn as_scalar(&self) -> Option<&IntArgument> {
        match self {
            LambdaArgument::Int(arg) | LambdaArgument::EInt(arg) => Some(arg),
            _ => None,
        }
    }

    /// Tensor payload, if this is a tensor argument.
    pub fn as_tensor(&self) -> Option<&TensorArgument> {
        match self {
            LambdaArgument::Tensor(t) | LambdaArgument::ETensor(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tensor_mut(&mut self) -> Option<&mut TensorArgument> {
        match self {
            LambdaArgument::Tensor(t) | LambdaArgument::ETensor(t) => Some(t),
            _ => None,
        }
    }

    /// Descriptive type name, see [`argument_type_name`].
    pub fn type_name(&self) -> String {
        argument_type_name(self)
    }
}

/// Descriptive name of an argument's type.
///
/// Plain scalars give the C type name (`uint8_t`), encrypted scalars
/// `encrypted <type>`, tensors `tensor<<type>>` or `tensor<encrypted <type>>`.
pub fn argument_type_name(arg: &LambdaArgument) -> String {
    let kind = arg.element_kind().c_name();

    match arg {
        LambdaArgument::Int(_) => kind.to_string(),
        LambdaArgument::EInt(_) => format!("encrypted {kind}"),
        LambdaArgument::Tensor(_) => format!("tensor<{kind}>"),
        LambdaArgument::ETensor(_) => format!("tensor<encrypted {kind}>"),
    }
}

impl PartialEq for LambdaArgument {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                LambdaArgument::Int(a) | LambdaArgument::EInt(a),
                LambdaArgument::Int(b) | LambdaArgument::EInt(b),
            ) => a == b,
            (
                LambdaArgument::Tensor(a) | LambdaArgument::ETensor(a),
                LambdaArgument::Tensor(b) | LambdaArgument::ETensor(b),
            ) => a == b,
            _ => false,
        }
    }
}

impl From<IntArgument> for LambdaArgument {
    fn from(arg: IntArgument) -> Self {
        LambdaArgument::Int(arg)
    }
}

impl From<TensorArgument> for LambdaArgument {
    fn from(tensor: TensorArgument) -> Self {
        LambdaArgument::Tensor(tensor)
    }
}

impl fmt::Display for LambdaArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LambdaArgument::Int(arg) | LambdaArgument::EInt(arg) => {
                write!(f, "{} {}", self.type_name(), arg)
            }
            LambdaArgument::Tensor(t) | LambdaArgument::ETensor(t) => {
                write!(f, "{}{}", self.type_name(), t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_for_every_kind() {
        for kind in IntKind::ALL {
            let name = kind.c_name();
            let scalar = match kind {
                IntKind::I8 => LambdaArgument::int(0i8),
                IntKind::U8 => LambdaArgument::int(0u8),
                IntKind::I16 => LambdaArgument::int(0i16),
                IntKind::U16 => LambdaArgument::int(0u16),
                IntKind::I32 => LambdaArgument::int(0i32),
                IntKind::U32 => LambdaArgument::int(0u32),
                IntKind::I64 => LambdaArgument::int(0i64),
                _ => LambdaArgument::int(0u64),
            };
            assert_eq!(scalar.type_name(), name);
            assert_eq!(scalar.element_kind(), kind);
        }
    }

    #[test]
    fn test_type_name_variants() {
        assert_eq!(LambdaArgument::int(1u8).type_name(), "uint8_t");
        assert_eq!(
            LambdaArgument::encrypted_int(-1i16).type_name(),
            "encrypted int16_t"
        );
        assert_eq!(
            LambdaArgument::tensor(TensorArgument::from_1d(&[1u32, 2])).type_name(),
            "tensor<uint32_t>"
        );
        assert_eq!(
            LambdaArgument::encrypted_tensor(TensorArgument::from_1d(&[1i64])).type_name(),
            "tensor<encrypted int64_t>"
        );
    }

    #[test]
    fn test_scalar_equality_across_tags() {
        assert_eq!(LambdaArgument::int(5u8), LambdaArgument::encrypted_int(5u32));
        assert_ne!(LambdaArgument::int(5u8), LambdaArgument::encrypted_int(6u8));
    }

    #[test]
    fn test_scalar_never_equals_tensor() {
        let scalar = LambdaArgument::int(1u8);
        let tensor = LambdaArgument::tensor(TensorArgument::from_slice(&[1u8], &[]));
        assert_ne!(scalar, tensor);
    }

    #[test]
    fn test_predicates() {
        let arg = LambdaArgument::encrypted_tensor(TensorArgument::from_1d(&[1u8]));
        assert!(arg.is_encrypted());
        assert!(arg.is_tensor());
        assert!(arg.as_scalar().is_none());
        assert_eq!(arg.as_tensor().unwrap().dimensions(), &[1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LambdaArgument::encrypted_int(7u8).to_string(),
            "encrypted uint8_t 7"
        );
        let tensor = TensorArgument::from_slice(&[0i32; 6], &[2, 3]);
        assert_eq!(
            LambdaArgument::tensor(tensor).to_string(),
            "tensor<int32_t>[2x3]"
        );
    }
}
