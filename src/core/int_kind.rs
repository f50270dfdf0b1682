// This module defines the numeric kinds an argument can be backed by. IntWidth lists the
// four physical storage widths (8, 16, 32, 64 bits) and IntKind pairs a width with its
// signedness, giving the eight backing kinds int8_t..uint64_t. BackingInt is a sealed
// trait implemented for the eight primitive integer types; it ties each Rust type to its
// IntKind, converts values to and from a zero-extended 64-bit pattern, and moves typed
// vectors in and out of the untyped TensorBuffer. Keeping one kind enumeration lets the
// scalar and tensor argument types stay non-generic while constructors and accessors
// remain statically typed.

//! Integer backing kinds for scalar and tensor arguments.

use std::fmt;

use super::tensor::TensorBuffer;

/// Physical storage width of a backing integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Number of bits of the width.
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

/// A backing integer kind: physical width plus signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntKind {
    pub width: IntWidth,
    pub signed: bool,
}

impl IntKind {
    pub const I8: IntKind = IntKind::new(IntWidth::W8, true);
    pub const U8: IntKind = IntKind::new(IntWidth::W8, false);
    pub const I16: IntKind = IntKind::new(IntWidth::W16, true);
    pub const U16: IntKind = IntKind::new(IntWidth::W16, false);
    pub const I32: IntKind = IntKind::new(IntWidth::W32, true);
    pub const U32: IntKind = IntKind::new(IntWidth::W32, false);
    pub const I64: IntKind = IntKind::new(IntWidth::W64, true);
    pub const U64: IntKind = IntKind::new(IntWidth::W64, false);

    /// Every kind, grouped by width, signed before unsigned.
    pub const ALL: [IntKind; 8] = [
        IntKind::I8,
        IntKind::U8,
        IntKind::I16,
        IntKind::U16,
        IntKind::I32,
        IntKind::U32,
        IntKind::I64,
        IntKind::U64,
    ];

    pub const fn new(width: IntWidth, signed: bool) -> Self {
        Self { width, signed }
    }

    pub const fn bits(self) -> u32 {
        self.width.bits()
    }

    /// C name of the kind, e.g. `uint16_t`.
    pub const fn c_name(self) -> &'static str {
        match (self.width, self.signed) {
            (IntWidth::W8, true) => "int8_t",
            (IntWidth::W8, false) => "uint8_t",
            (IntWidth::W16, true) => "int16_t",
            (IntWidth::W16, false) => "uint16_t",
            (IntWidth::W32, true) => "int32_t",
            (IntWidth::W32, false) => "uint32_t",
            (IntWidth::W64, true) => "int64_t",
            (IntWidth::W64, false) => "uint64_t",
        }
    }

    /// Short name used by the literal syntax, e.g. `u16`.
    pub const fn short_name(self) -> &'static str {
        match (self.width, self.signed) {
            (IntWidth::W8, true) => "i8",
            (IntWidth::W8, false) => "u8",
            (IntWidth::W16, true) => "i16",
            (IntWidth::W16, false) => "u16",
            (IntWidth::W32, true) => "i32",
            (IntWidth::W32, false) => "u32",
            (IntWidth::W64, true) => "i64",
            (IntWidth::W64, false) => "u64",
        }
    }

    /// Smallest representable value.
    pub fn min_value(self) -> i128 {
        if self.signed {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value.
    pub fn max_value(self) -> i128 {
        if self.signed {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    pub fn contains(self, value: i128) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }

    /// Mask selecting the bits of the physical width.
    pub const fn mask(self) -> u64 {
        match self.width {
            IntWidth::W64 => u64::MAX,
            w => (1u64 << w.bits()) - 1,
        }
    }

    /// Interpret a zero-extended bit pattern as a value of this kind.
    pub fn decode(self, bits: u64) -> i128 {
        let bits = bits & self.mask();
        if self.signed {
            let shift = 64 - self.bits();
            (((bits << shift) as i64) >> shift) as i128
        } else {
            bits as i128
        }
    }
}

impl fmt::Display for IntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer types that can back an argument.
pub trait BackingInt:
    Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static + sealed::Sealed
{
    /// Kind of this backing type.
    const KIND: IntKind;

    /// Zero-extended bit pattern of the value.
    fn to_bits(self) -> u64;

    /// Value from a bit pattern, truncated to the width.
    fn from_bits(bits: u64) -> Self;

    /// Wrap a typed vector into a tensor buffer.
    fn into_buffer(values: Vec<Self>) -> TensorBuffer;

    /// Typed view of a buffer; `None` if the buffer holds another kind.
    fn view(buffer: &TensorBuffer) -> Option<&[Self]>;

    /// Typed mutable view of a buffer; `None` if the buffer holds another kind.
    fn view_mut(buffer: &mut TensorBuffer) -> Option<&mut [Self]>;
}

macro_rules! impl_backing_int {
    ($($ty:ty => $unsigned:ty, $kind:ident, $variant:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl BackingInt for $ty {
                const KIND: IntKind = IntKind::$kind;

                #[inline]
                fn to_bits(self) -> u64 {
                    self as $unsigned as u64
                }

                #[inline]
                fn from_bits(bits: u64) -> Self {
                    bits as $unsigned as $ty
                }

                fn into_buffer(values: Vec<Self>) -> TensorBuffer {
                    TensorBuffer::$variant(values)
                }

                fn view(buffer: &TensorBuffer) -> Option<&[Self]> {
                    match buffer {
                        TensorBuffer::$variant(values) => Some(values.as_slice()),
                        _ => None,
                    }
                }

                fn view_mut(buffer: &mut TensorBuffer) -> Option<&mut [Self]> {
                    match buffer {
                        TensorBuffer::$variant(values) => Some(values.as_mut_slice()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_backing_int! {
    i8 => u8, I8, I8;
    u8 => u8, U8, U8;
    i16 => u16, I16, I16;
    u16 => u16, U16, U16;
    i32 => u32, I32, I32;
    u32 => u32, U32, U32;
    i64 => u64, I64, I64;
    u64 => u64, U64, U64;
}
