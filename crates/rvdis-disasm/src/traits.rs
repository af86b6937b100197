//! Disassembler traits.

use rvdis_core::{Instruction, InstructionInfo, InstructionText, Xlen};
use tracing::{debug, trace};

use crate::riscv;
use crate::DecodeError;

/// Result of decoding an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Address of the window.
    pub address: u64,
    /// The little-endian word that was decoded.
    pub raw: u32,
    /// The decoded instruction.
    pub instruction: Instruction,
    /// Number of bytes consumed.
    pub size: usize,
}

impl DecodedInstruction {
    /// Length and control-flow edges.
    pub fn info(&self) -> InstructionInfo {
        riscv::instruction_info(&self.instruction, self.address)
    }

    /// Rendered text.
    pub fn text(&self) -> InstructionText {
        riscv::instruction_text(&self.instruction, self.address)
    }

    /// Returns the address of the next sequential instruction.
    pub fn end_address(&self) -> u64 {
        self.address.wrapping_add(self.size as u64)
    }
}

/// Trait for architecture-specific instruction decoders.
pub trait Disassembler {
    /// Decode a single instruction window at the given address.
    ///
    /// # Arguments
    /// * `bytes` - The raw bytes of exactly one instruction
    /// * `address` - The virtual address of the first byte
    fn decode_instruction(
        &self,
        bytes: &[u8],
        address: u64,
    ) -> Result<DecodedInstruction, DecodeError>;

    /// Returns the minimum instruction size for this architecture.
    fn min_instruction_size(&self) -> usize;

    /// Returns the maximum instruction size for this architecture.
    fn max_instruction_size(&self) -> usize;

    /// Returns whether instructions are fixed-width.
    fn is_fixed_width(&self) -> bool;

    /// Returns the register width being decoded.
    fn xlen(&self) -> Xlen;

    /// Decode a window and derive its length and control-flow edges.
    fn instruction_info(&self, bytes: &[u8], address: u64) -> Result<InstructionInfo, DecodeError> {
        self.decode_instruction(bytes, address)
            .map(|decoded| decoded.info())
            .inspect_err(|e| log_failure(bytes, address, e))
    }

    /// Decode a window and render its text.
    fn instruction_text(&self, bytes: &[u8], address: u64) -> Result<InstructionText, DecodeError> {
        self.decode_instruction(bytes, address)
            .map(|decoded| decoded.text())
            .inspect_err(|e| log_failure(bytes, address, e))
    }

    /// Disassemble a block of code window by window.
    ///
    /// Each window decodes independently; a failure is recorded in place and
    /// the sweep continues with the next window. A trailing partial window
    /// produces one final error.
    fn disassemble_block(
        &self,
        bytes: &[u8],
        start_address: u64,
    ) -> Vec<Result<DecodedInstruction, DecodeError>> {
        let step = self.max_instruction_size();
        let mut instructions = Vec::with_capacity(bytes.len() / step + 1);

        for (index, window) in bytes.chunks(step).enumerate() {
            let address = start_address.wrapping_add((index * step) as u64);
            let result = self.decode_instruction(window, address);
            if let Err(ref e) = result {
                trace!(address, error = %e, "skipping window");
            }
            instructions.push(result);
        }

        instructions
    }
}

fn log_failure(bytes: &[u8], address: u64, err: &DecodeError) {
    match bytes.first() {
        Some(byte) => debug!("wrong instruction {:#09b} @ {:#010x}: {}", byte & 0x7F, address, err),
        None => debug!("wrong instruction @ {:#010x}: {}", address, err),
    }
}
