// This module implements IntArgument, the payload of plaintext and encrypted scalar
// arguments. An IntArgument stores the zero-extended bit pattern of its value together
// with the backing IntKind and a logical precision that may be smaller than the physical
// width. When the precision is smaller, construction keeps only the bit selected by
// `1 << (precision - 1)` (a single-bit mask, not the low `precision` bits). Equality is
// value based: two scalars are equal when their mathematical values match, independent of
// backing kind or of whether they are tagged as encrypted.

//! Integer scalar arguments.

use std::fmt;

use super::int_kind::{BackingInt, IntKind};

/// Integer scalar argument with a logical precision.
///
/// The precision is the number of significant bits of the value and may be
/// lower than the width of the backing type.
#[derive(Debug, Clone, Copy)]
pub struct IntArgument {
    kind: IntKind,
    bits: u64,
    precision: u32,
}

impl IntArgument {
    /// Create a scalar using the full width of `T` as precision.
    pub fn new<T: BackingInt>(value: T) -> Self {
        Self::with_precision(value, T::KIND.bits())
    }

    /// Create a scalar with an explicit precision.
    ///
    /// If `precision` is below the width of `T`, the stored value is
    /// `value & (1 << (precision - 1))`. A precision of zero stores zero.
    /// Precisions above the width are recorded but do not alter the value.
    pub fn with_precision<T: BackingInt>(value: T, precision: u32) -> Self {
        let kind = T::KIND;
        let mut bits = value.to_bits();

        if precision < kind.bits() {
            let mask = match precision {
                0 => 0,
                p => 1u64 << (p - 1),
            };
            bits &= mask;
        }

        Self {
            kind,
            bits,
            precision,
        }
    }

    /// Backing kind of the value.
    pub fn kind(&self) -> IntKind {
        self.kind
    }

    /// Logical precision in bits.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Stored value as `T`, or `None` if `T` is not the backing type.
    pub fn value<T: BackingInt>(&self) -> Option<T> {
        (T::KIND == self.kind).then(|| T::from_bits(self.bits))
    }

    /// Stored value, sign-extended according to the backing kind.
    pub fn as_i128(&self) -> i128 {
        self.kind.decode(self.bits)
    }

    /// Raw bit pattern, zero-extended to 64 bits.
    pub fn bits(&self) -> u64 {
        self.bits
    }
}

impl PartialEq for IntArgument {
    fn eq(&self, other: &Self) -> bool {
        self.as_i128() == other.as_i128()
    }
}

impl Eq for IntArgument {}

impl fmt::Display for IntArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i128())
    }
}

impl<T: BackingInt> From<T> for IntArgument {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_precision_keeps_value() {
        let arg = IntArgument::new(200u8);
        assert_eq!(arg.precision(), 8);
        assert_eq!(arg.value::<u8>(), Some(200));
        assert_eq!(arg.kind(), IntKind::U8);
    }

    #[test]
    fn test_precision_keeps_single_bit() {
        // Only bit `precision - 1` survives.
        assert_eq!(IntArgument::with_precision(15u8, 4).value::<u8>(), Some(8));
        assert_eq!(IntArgument::with_precision(7u8, 4).value::<u8>(), Some(0));
        assert_eq!(IntArgument::with_precision(0xffu8, 1).value::<u8>(), Some(1));
        assert_eq!(IntArgument::with_precision(0xffu8, 4).precision(), 4);
    }

    #[test]
    fn test_precision_zero_clears_value() {
        assert_eq!(IntArgument::with_precision(0xffu16, 0).value::<u16>(), Some(0));
    }

    #[test]
    fn test_precision_above_width_is_unchecked() {
        let arg = IntArgument::with_precision(5u8, 12);
        assert_eq!(arg.value::<u8>(), Some(5));
        assert_eq!(arg.precision(), 12);
    }

    #[test]
    fn test_signed_precision_masks_bit_pattern() {
        let arg = IntArgument::with_precision(-1i8, 4);
        assert_eq!(arg.value::<i8>(), Some(8));

        let arg = IntArgument::with_precision(-1i64, 40);
        assert_eq!(arg.value::<i64>(), Some(1 << 39));
    }

    #[test]
    fn test_value_with_wrong_type() {
        let arg = IntArgument::new(3u16);
        assert_eq!(arg.value::<u8>(), None);
        assert_eq!(arg.value::<i16>(), None);
    }

    #[test]
    fn test_equality_ignores_kind() {
        assert_eq!(IntArgument::new(42u8), IntArgument::new(42u64));
        assert_eq!(IntArgument::new(-3i16), IntArgument::new(-3i64));
        assert_ne!(IntArgument::new(42u8), IntArgument::new(43u8));
        assert_ne!(IntArgument::new(-1i8), IntArgument::new(255u8));
    }

    #[test]
    fn test_signed_values() {
        let arg = IntArgument::new(i32::MIN);
        assert_eq!(arg.as_i128(), i32::MIN as i128);
        assert_eq!(arg.bits(), 0x8000_0000);
        assert_eq!(arg.to_string(), "-2147483648");
    }
}
