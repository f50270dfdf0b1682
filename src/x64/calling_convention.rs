// This module implements the integer part of the System V AMD64 ABI used to pass lowered
// arguments to compiled functions. Every lowered argument word is a 64-bit integer or
// pointer, so only the general-purpose bank is involved: the first six words go to RDI,
// RSI, RDX, RCX, R8 and R9, the rest to 8-byte stack slots in order. CCAssigner is the
// assignment interface and SysVAssigner its System V implementation; must_assign_stack
// forces the remaining words onto the stack. The total outgoing stack area is rounded up
// to 16 bytes as the ABI requires at call sites.

//! System V x86-64 argument assignment for lowered argument words.

use std::fmt;

/// General-purpose argument registers, in assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpReg {
    Rdi,
    Rsi,
    Rdx,
    Rcx,
    R8,
    R9,
}

impl GpReg {
    pub fn name(self) -> &'static str {
        match self {
            GpReg::Rdi => "rdi",
            GpReg::Rsi => "rsi",
            GpReg::Rdx => "rdx",
            GpReg::Rcx => "rcx",
            GpReg::R8 => "r8",
            GpReg::R9 => "r9",
        }
    }
}

impl fmt::Display for GpReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a value was widened to fill its 64-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgAttribute {
    /// Already 64 bits wide.
    None,
    /// Sign extend the value.
    SignExt,
    /// Zero extend the value.
    ZeroExt,
    /// Address of tensor storage.
    Pointer,
}

/// Argument assignment result from calling convention analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CCAssignment {
    /// Size of the argument in bytes.
    pub size: u32,
    /// Required alignment in bytes.
    pub align: u32,
    /// Assigned register (if any).
    pub reg: Option<GpReg>,
    /// Stack offset (if assigned to stack).
    pub stack_off: Option<i32>,
    /// Argument attributes.
    pub attribute: ArgAttribute,
}

impl CCAssignment {
    /// Create a new unassigned 8-byte word.
    pub fn new(attribute: ArgAttribute) -> Self {
        Self {
            size: 8,
            align: 8,
            reg: None,
            stack_off: None,
            attribute,
        }
    }

    pub fn location(&self) -> ArgLocation {
        match (self.reg, self.stack_off) {
            (Some(reg), _) => ArgLocation::Register(reg),
            (None, Some(off)) => ArgLocation::Stack(off),
            (None, None) => ArgLocation::Unassigned,
        }
    }
}

/// Where an argument word ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgLocation {
    Register(GpReg),
    Stack(i32),
    Unassigned,
}

impl fmt::Display for ArgLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgLocation::Register(reg) => write!(f, "{reg}"),
            ArgLocation::Stack(off) => write!(f, "[rsp+{off}]"),
            ArgLocation::Unassigned => f.write_str("-"),
        }
    }
}

/// Trait for calling convention argument assignment.
pub trait CCAssigner {
    /// Assign an argument according to the calling convention.
    fn assign_arg(&mut self, arg: &mut CCAssignment);

    /// Reset state for a new call.
    fn reset(&mut self);

    /// Get the total stack space needed for arguments.
    fn get_stack_size(&self) -> u32;
}

/// System V x86-64 calling convention assigner for integer words.
#[derive(Debug, Default)]
pub struct SysVAssigner {
    /// Current GP argument register index.
    gp_cnt: usize,
    /// Current stack offset for arguments.
    stack: u32,
    /// Force remaining args to stack.
    must_assign_stack: bool,
}

impl SysVAssigner {
    /// System V x86-64 GP argument registers.
    pub const GP_ARG_REGS: [GpReg; 6] = [
        GpReg::Rdi,
        GpReg::Rsi,
        GpReg::Rdx,
        GpReg::Rcx,
        GpReg::R8,
        GpReg::R9,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Force remaining arguments to be assigned to stack.
    pub fn set_must_assign_stack(&mut self) {
        self.must_assign_stack = true;
    }

    /// Number of GP argument registers used so far.
    pub fn gp_used(&self) -> usize {
        self.gp_cnt
    }

    /// Align a value up to the specified alignment.
    fn align_up(value: u32, align: u32) -> u32 {
        (value + align - 1) & !(align - 1)
    }
}

impl CCAssigner for SysVAssigner {
    fn assign_arg(&mut self, arg: &mut CCAssignment) {
        if !self.must_assign_stack && self.gp_cnt < Self::GP_ARG_REGS.len() {
            arg.reg = Some(Self::GP_ARG_REGS[self.gp_cnt]);
            self.gp_cnt += 1;
        } else {
            let align = arg.align.max(8);
            self.stack = Self::align_up(self.stack, align);
            arg.stack_off = Some(self.stack as i32);
            self.stack += Self::align_up(arg.size, 8);
        }
    }

    fn reset(&mut self) {
        self.gp_cnt = 0;
        self.stack = 0;
        self.must_assign_stack = false;
    }

    fn get_stack_size(&self) -> u32 {
        Self::align_up(self.stack, 16)
    }
}
