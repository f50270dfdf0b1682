// This module provides type descriptors for the parameters of compiled functions. The
// central type is EncryptedIntegerType, an encrypted integer of a given bit width and
// signedness, built through get_checked which rejects a zero width. TypeDescriptor adds
// plaintext integers and ranked tensors (with -1 for dynamic sizes) so a whole function
// signature can be described. Descriptors can be queried the same way external binding
// layers do (is it an unsigned or a signed encrypted integer, and of which width) and
// can check whether a runtime LambdaArgument is acceptable for a parameter.
// FunctionSignature applies that check to a complete argument list before lowering.

//! Parameter type descriptors and signature checking.

use std::fmt;

use crate::core::{ArgResult, ArgumentError, LambdaArgument};

/// Marker used for dynamic tensor sizes.
pub const DYNAMIC_SIZE: i64 = -1;

/// Encrypted integer type of a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncryptedIntegerType {
    width: u32,
    signed: bool,
}

impl EncryptedIntegerType {
    /// Create an encrypted integer type, failing on invalid widths.
    pub fn get_checked(width: u32, signed: bool) -> ArgResult<Self> {
        if width == 0 {
            return Err(ArgumentError::TypeConstruction {
                width,
                reason: "encrypted integers need a width of at least one bit".to_string(),
            });
        }
        Ok(Self { width, signed })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }
}

impl fmt::Display for EncryptedIntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.signed { "esint" } else { "eint" };
        write!(f, "{name}<{}>", self.width)
    }
}

/// Type of a compiled-function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    EncryptedInteger(EncryptedIntegerType),
    Integer { width: u32, signed: bool },
    Tensor { shape: Vec<i64>, element: Box<TypeDescriptor> },
}

impl TypeDescriptor {
    pub fn encrypted(width: u32, signed: bool) -> ArgResult<Self> {
        EncryptedIntegerType::get_checked(width, signed).map(TypeDescriptor::EncryptedInteger)
    }

    pub fn integer(width: u32, signed: bool) -> Self {
        TypeDescriptor::Integer { width, signed }
    }

    /// Tensor of `element`; the element must itself be a scalar type.
    pub fn tensor(shape: &[i64], element: TypeDescriptor) -> Self {
        TypeDescriptor::Tensor {
            shape: shape.to_vec(),
            element: Box::new(element),
        }
    }

    /// Unsigned encrypted integer (`eint`).
    pub fn is_encrypted_integer(&self) -> bool {
        matches!(self, TypeDescriptor::EncryptedInteger(ty) if !ty.is_signed())
    }

    /// Signed encrypted integer (`esint`).
    pub fn is_encrypted_signed_integer(&self) -> bool {
        matches!(self, TypeDescriptor::EncryptedInteger(ty) if ty.is_signed())
    }

    /// Width of an encrypted integer type, or 0 for any other type.
    pub fn encrypted_integer_width(&self) -> u32 {
        match self {
            TypeDescriptor::EncryptedInteger(ty) => ty.width(),
            _ => 0,
        }
    }

    /// Whether `arg` can be passed for a parameter of this type.
    ///
    /// Encryption tags and signedness must match and the backing width must
    /// hold the declared width. Tensor shapes must match, dynamic sizes
    /// matching anything.
    pub fn accepts(&self, arg: &LambdaArgument) -> bool {
        match (self, arg) {
            (TypeDescriptor::Tensor { shape, element }, LambdaArgument::Tensor(t))
            | (TypeDescriptor::Tensor { shape, element }, LambdaArgument::ETensor(t)) => {
                let kind = t.element_kind();
                shape.len() == t.rank()
                    && shape
                        .iter()
                        .zip(t.dimensions())
                        .all(|(&expected, &actual)| expected == DYNAMIC_SIZE || expected == actual)
                    && element.accepts_element(arg.is_encrypted(), kind.bits(), kind.signed)
            }
            (TypeDescriptor::Tensor { .. }, _) => false,
            (scalar, LambdaArgument::Int(a) | LambdaArgument::EInt(a)) => {
                scalar.accepts_element(arg.is_encrypted(), a.kind().bits(), a.kind().signed)
            }
            _ => false,
        }
    }

    fn accepts_element(&self, encrypted: bool, bits: u32, signed: bool) -> bool {
        match self {
            TypeDescriptor::EncryptedInteger(ty) => {
                encrypted && ty.is_signed() == signed && ty.width() <= bits
            }
            TypeDescriptor::Integer { width, signed: s } => {
                !encrypted && *s == signed && *width <= bits
            }
            TypeDescriptor::Tensor { .. } => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::EncryptedInteger(ty) => write!(f, "{ty}"),
            TypeDescriptor::Integer { width, signed } => {
                let name = if *signed { "sint" } else { "int" };
                write!(f, "{name}<{width}>")
            }
            TypeDescriptor::Tensor { shape, element } => {
                f.write_str("tensor<")?;
                for &size in shape {
                    if size == DYNAMIC_SIZE {
                        f.write_str("?x")?;
                    } else {
                        write!(f, "{size}x")?;
                    }
                }
                write!(f, "{element}>")
            }
        }
    }
}

/// Parameter list of a compiled function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignature {
    pub params: Vec<TypeDescriptor>,
}

impl FunctionSignature {
    pub fn new(params: Vec<TypeDescriptor>) -> Self {
        Self { params }
    }

    /// Check an argument list against the signature.
    pub fn check(&self, args: &[LambdaArgument]) -> ArgResult<()> {
        if args.len() != self.params.len() {
            return Err(ArgumentError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        for (index, (param, arg)) in self.params.iter().zip(args).enumerate() {
            if !param.accepts(arg) {
                log::debug!("argument #{} ({}) rejected by {}", index, arg, param);
                return Err(ArgumentError::SignatureMismatch {
                    index,
                    expected: param.to_string(),
                    actual: arg.type_name(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
