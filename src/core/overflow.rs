//! Overflow-checked multiplication for size computations.

use super::error::{ArgResult, ArgumentError};

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer types accepted by [`safe_unsigned_mul`].
///
/// Sealed: signed operands are rejected at compile time.
pub trait Unsigned: Copy + sealed::Sealed {
    fn checked_mul(self, rhs: Self) -> Option<Self>;

    /// Lossless widening used for error reporting.
    fn widen(self) -> u128;
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Unsigned for $ty {
                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_mul(self, rhs)
                }

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64, usize);

/// Computes `accu *= factor`, or returns [`ArgumentError::Overflow`] if the
/// product does not fit. `accu` is left untouched on failure.
pub fn safe_unsigned_mul<T: Unsigned>(accu: &mut T, factor: T) -> ArgResult<()> {
    match accu.checked_mul(factor) {
        Some(product) => {
            *accu = product;
            Ok(())
        }
        None => Err(ArgumentError::Overflow {
            accumulator: accu.widen(),
            factor: factor.widen(),
        }),
    }
}
