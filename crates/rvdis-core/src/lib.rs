//! # rvdis-core
//!
//! Core abstractions for the rvdis disassembler. This crate defines the
//! decoded RISC-V instruction records, the bit-field helpers used to build
//! them, register display names, and the control-flow and text types the
//! decoder hands back to its host.

pub mod arch;
pub mod bits;
pub mod error;
pub mod info;
pub mod instruction;
pub mod register;
pub mod text;

pub use arch::Xlen;
pub use error::Error;
pub use info::{Branch, BranchKind, InstructionInfo};
pub use instruction::{BType, Format, IType, Instruction, JType, Opcode, RType, SType, UType};
pub use register::Register;
pub use text::{InstructionText, Token, TokenKind};

/// Byte length of every base-ISA instruction.
pub const INSTRUCTION_SIZE: usize = 4;
