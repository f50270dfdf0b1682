// This module implements TensorArgument, a linearized row-major tensor of integers plus
// its shape. The values live in a TensorBuffer, an enum with one Vec variant per backing
// kind, so a single tensor type covers every element kind while typed access goes through
// BackingInt. Tensors are built by copying a slice, by taking ownership of a Vec, from a
// one-dimensional slice, or from a fixed-size two-dimensional array. The element count is
// derived lazily from the dimensions with overflow-checked multiplication; the storage
// length is never validated against the shape at construction. Equality requires equal
// dimensions, equal storage lengths and element-wise equal values.

//! Tensor arguments.

use std::fmt;

use super::error::{ArgResult, ArgumentError};
use super::int_kind::{BackingInt, IntKind};
use super::overflow::safe_unsigned_mul;

/// Linearized tensor storage, one variant per backing kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorBuffer {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
}

macro_rules! dispatch {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            TensorBuffer::I8($values) => $body,
            TensorBuffer::U8($values) => $body,
            TensorBuffer::I16($values) => $body,
            TensorBuffer::U16($values) => $body,
            TensorBuffer::I32($values) => $body,
            TensorBuffer::U32($values) => $body,
            TensorBuffer::I64($values) => $body,
            TensorBuffer::U64($values) => $body,
        }
    };
}

impl TensorBuffer {
    /// Element kind of the buffer.
    pub fn kind(&self) -> IntKind {
        match self {
            TensorBuffer::I8(_) => IntKind::I8,
            TensorBuffer::U8(_) => IntKind::U8,
            TensorBuffer::I16(_) => IntKind::I16,
            TensorBuffer::U16(_) => IntKind::U16,
            TensorBuffer::I32(_) => IntKind::I32,
            TensorBuffer::U32(_) => IntKind::U32,
            TensorBuffer::I64(_) => IntKind::I64,
            TensorBuffer::U64(_) => IntKind::U64,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        dispatch!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at linear index `index`, widened to `i128`.
    pub fn get(&self, index: usize) -> Option<i128> {
        dispatch!(self, values => values.get(index).map(|&v| v as i128))
    }

    /// Address of the first element.
    pub fn data_address(&self) -> usize {
        dispatch!(self, values => values.as_ptr() as usize)
    }
}

/// Tensor argument: linearized values plus dimensions.
///
/// Values are stored in row-major order (last dimension varies fastest).
#[derive(Debug, Clone)]
pub struct TensorArgument {
    values: TensorBuffer,
    dimensions: Vec<i64>,
}

impl TensorArgument {
    /// Create a tensor by copying `values`, interpreted with the shape `dimensions`.
    pub fn from_slice<T: BackingInt>(values: &[T], dimensions: &[i64]) -> Self {
        Self::from_vec(values.to_vec(), dimensions)
    }

    /// Create a tensor that takes ownership of `values`.
    pub fn from_vec<T: BackingInt>(values: Vec<T>, dimensions: &[i64]) -> Self {
        Self {
            values: T::into_buffer(values),
            dimensions: dimensions.to_vec(),
        }
    }

    /// Create a one-dimensional tensor from `values`.
    pub fn from_1d<T: BackingInt>(values: &[T]) -> Self {
        Self::from_slice(values, &[values.len() as i64])
    }

    /// Create a rank-2 tensor from a fixed-size array.
    pub fn from_2d<T: BackingInt, const ROWS: usize, const COLS: usize>(
        array: &[[T; COLS]; ROWS],
    ) -> Self {
        let values: Vec<T> = array.iter().flatten().copied().collect();
        Self::from_vec(values, &[ROWS as i64, COLS as i64])
    }

    /// Dimensions in construction order.
    pub fn dimensions(&self) -> &[i64] {
        &self.dimensions
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Element kind of the tensor.
    pub fn element_kind(&self) -> IntKind {
        self.values.kind()
    }

    /// Product of all dimensions.
    ///
    /// Returns an error if a dimension is negative or the product cannot be
    /// represented as a `usize`.
    pub fn num_elements(&self) -> ArgResult<usize> {
        let mut accu: usize = 1;

        for (index, &size) in self.dimensions.iter().enumerate() {
            safe_unsigned_mul(&mut accu, dimension_as_usize(index, size)?)?;
        }

        Ok(accu)
    }

    /// Row-major contiguous strides, in elements.
    pub fn strides(&self) -> ArgResult<Vec<usize>> {
        let mut strides = vec![0usize; self.dimensions.len()];
        let mut accu: usize = 1;

        for (index, &size) in self.dimensions.iter().enumerate().rev() {
            strides[index] = accu;
            safe_unsigned_mul(&mut accu, dimension_as_usize(index, size)?)?;
        }

        Ok(strides)
    }

    /// Typed view of the linearized values, `None` if `T` is not the element type.
    pub fn values<T: BackingInt>(&self) -> Option<&[T]> {
        T::view(&self.values)
    }

    /// Typed mutable view of the linearized values.
    pub fn values_mut<T: BackingInt>(&mut self) -> Option<&mut [T]> {
        T::view_mut(&mut self.values)
    }

    /// Untyped storage.
    pub fn buffer(&self) -> &TensorBuffer {
        &self.values
    }

    /// Number of stored values (not derived from the shape).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn dimension_as_usize(index: usize, size: i64) -> ArgResult<usize> {
    if size < 0 {
        return Err(ArgumentError::NegativeDimension { index, size });
    }
    usize::try_from(size).map_err(|_| ArgumentError::Overflow {
        accumulator: 1,
        factor: size as u128,
    })
}

impl PartialEq for TensorArgument {
    fn eq(&self, other: &Self) -> bool {
        if self.dimensions != other.dimensions || self.len() != other.len() {
            return false;
        }

        (0..self.len()).all(|i| self.values.get(i) == other.values.get(i))
    }
}

impl Eq for TensorArgument {}

impl fmt::Display for TensorArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, dim) in self.dimensions.iter().enumerate() {
            if i > 0 {
                f.write_str("x")?;
            }
            write!(f, "{dim}")?;
        }
        f.write_str("]")
    }
}
