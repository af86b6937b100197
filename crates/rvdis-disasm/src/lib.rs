//! # rvdis-disasm
//!
//! RISC-V instruction decoding for rvdis.
//!
//! This crate turns 4-byte windows into [`rvdis_core::Instruction`] records
//! and derives the two views a host disassembler asks for:
//! - control-flow info (length and branch edges)
//! - tokenized text (mnemonic and operands, with pseudo-instruction folding)
//!
//! Every operation is a pure function of the window and its address.

pub mod error;
pub mod riscv;
pub mod traits;

pub use error::DecodeError;
pub use riscv::{
    decode, decode_word, indirect_target, instruction_info, instruction_text, RiscVDisassembler,
};
pub use traits::{DecodedInstruction, Disassembler};
