// This module lowers LambdaArgument lists into the machine words a compiled function
// receives. A scalar becomes one 64-bit word, sign- or zero-extended from its backing
// kind. A tensor becomes a memref descriptor: allocated pointer, aligned pointer, offset,
// one size per dimension and one row-major stride per dimension. Before a tensor is
// lowered its element count is computed with overflow checking and compared with the
// stored length; either failure aborts the whole call. Each word is then placed by a
// CCAssigner (System V by default). The resulting CallFrame keeps its word list in a
// bumpalo arena and borrows the arguments, so the tensor addresses it holds stay valid.

//! Lowering of argument lists onto the calling convention.

use std::fmt;
use std::marker::PhantomData;

use bumpalo::{collections::Vec as BumpVec, Bump};

use super::calling_convention::{
    ArgAttribute, ArgLocation, CCAssigner, CCAssignment, SysVAssigner,
};
use crate::core::{
    ArgResult, ArgumentError, IntArgument, IntWidth, LambdaArgument, TensorArgument,
};
use crate::types::FunctionSignature;

/// Role of a lowered word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Scalar,
    AllocatedPtr,
    AlignedPtr,
    Offset,
    Size(usize),
    Stride(usize),
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordKind::Scalar => f.write_str("scalar"),
            WordKind::AllocatedPtr => f.write_str("allocated"),
            WordKind::AlignedPtr => f.write_str("aligned"),
            WordKind::Offset => f.write_str("offset"),
            WordKind::Size(dim) => write!(f, "size[{dim}]"),
            WordKind::Stride(dim) => write!(f, "stride[{dim}]"),
        }
    }
}

/// One 64-bit word of a lowered call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoweredWord {
    /// Index of the argument the word belongs to.
    pub arg_index: usize,
    pub kind: WordKind,
    pub value: u64,
    pub assignment: CCAssignment,
}

impl LoweredWord {
    pub fn location(&self) -> ArgLocation {
        self.assignment.location()
    }
}

/// Lowered argument words of a single call.
#[derive(Debug)]
pub struct CallFrame<'a> {
    words: BumpVec<'a, LoweredWord>,
    stack_size: u32,
    _args: PhantomData<&'a [LambdaArgument]>,
}

impl<'a> CallFrame<'a> {
    pub fn words(&self) -> &[LoweredWord] {
        &self.words
    }

    /// Words belonging to argument `index`.
    pub fn words_for(&self, index: usize) -> impl Iterator<Item = &LoweredWord> {
        self.words.iter().filter(move |w| w.arg_index == index)
    }

    /// Words passed in registers.
    pub fn register_words(&self) -> impl Iterator<Item = &LoweredWord> {
        self.words.iter().filter(|w| w.assignment.reg.is_some())
    }

    /// Words passed on the stack.
    pub fn stack_words(&self) -> impl Iterator<Item = &LoweredWord> {
        self.words.iter().filter(|w| w.assignment.stack_off.is_some())
    }

    /// Outgoing stack area in bytes, 16-byte aligned.
    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }
}

/// Lower `args` with the System V convention.
pub fn lower_arguments<'a>(
    arena: &'a Bump,
    args: &'a [LambdaArgument],
) -> ArgResult<CallFrame<'a>> {
    lower_arguments_with(arena, &mut SysVAssigner::new(), args)
}

/// Check `args` against `signature`, then lower them.
pub fn lower_call<'a>(
    arena: &'a Bump,
    signature: &FunctionSignature,
    args: &'a [LambdaArgument],
) -> ArgResult<CallFrame<'a>> {
    signature.check(args)?;
    lower_arguments(arena, args)
}

/// Lower `args`, placing words with `assigner`.
pub fn lower_arguments_with<'a, A: CCAssigner>(
    arena: &'a Bump,
    assigner: &mut A,
    args: &'a [LambdaArgument],
) -> ArgResult<CallFrame<'a>> {
    assigner.reset();
    let mut words = BumpVec::new_in(arena);

    for (index, arg) in args.iter().enumerate() {
        log::debug!("lowering argument #{}: {}", index, arg);
        let first = words.len();

        match arg {
            LambdaArgument::Int(scalar) | LambdaArgument::EInt(scalar) => {
                let (value, attribute) = scalar_word(scalar);
                words.push(word(index, WordKind::Scalar, value, attribute));
            }
            LambdaArgument::Tensor(tensor) | LambdaArgument::ETensor(tensor) => {
                push_tensor_words(&mut words, index, tensor)?;
            }
        }

        for w in words.iter_mut().skip(first) {
            assigner.assign_arg(&mut w.assignment);
            log::trace!("  {} = {:#x} -> {}", w.kind, w.value, w.location());
        }
    }

    let stack_size = assigner.get_stack_size();
    log::debug!(
        "lowered {} arguments into {} words, {} bytes of stack",
        args.len(),
        words.len(),
        stack_size
    );

    Ok(CallFrame {
        words,
        stack_size,
        _args: PhantomData,
    })
}

fn word(arg_index: usize, kind: WordKind, value: u64, attribute: ArgAttribute) -> LoweredWord {
    LoweredWord {
        arg_index,
        kind,
        value,
        assignment: CCAssignment::new(attribute),
    }
}

fn scalar_word(scalar: &IntArgument) -> (u64, ArgAttribute) {
    let kind = scalar.kind();

    if kind.width == IntWidth::W64 {
        (scalar.bits(), ArgAttribute::None)
    } else if kind.signed {
        (scalar.as_i128() as i64 as u64, ArgAttribute::SignExt)
    } else {
        (scalar.bits(), ArgAttribute::ZeroExt)
    }
}

fn push_tensor_words(
    words: &mut BumpVec<'_, LoweredWord>,
    index: usize,
    tensor: &TensorArgument,
) -> ArgResult<()> {
    let expected = tensor.num_elements()?;
    if expected != tensor.len() {
        return Err(ArgumentError::ShapeMismatch {
            expected,
            actual: tensor.len(),
        });
    }

    let strides = tensor.strides()?;
    let address = tensor.buffer().data_address() as u64;

    words.push(word(index, WordKind::AllocatedPtr, address, ArgAttribute::Pointer));
    words.push(word(index, WordKind::AlignedPtr, address, ArgAttribute::Pointer));
    words.push(word(index, WordKind::Offset, 0, ArgAttribute::None));

    for (dim, &size) in tensor.dimensions().iter().enumerate() {
        words.push(word(index, WordKind::Size(dim), size as u64, ArgAttribute::None));
    }
    for (dim, &stride) in strides.iter().enumerate() {
        words.push(word(index, WordKind::Stride(dim), stride as u64, ArgAttribute::None));
    }

    Ok(())
}
