//! Decoded base-ISA instruction records.
//!
//! An [`Instruction`] is one of six format records. Each record only carries
//! the fields its format encodes, and immediates are stored already
//! sign-extended to machine width.
//!
//! Records are only produced by the decoder, so they serialize but do not
//! deserialize: a deserialized record could carry an odd branch offset or an
//! unknown sub-encoding.

use crate::{Register, INSTRUCTION_SIZE};

/// Recognized major opcodes (bits 6:0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    Lui,
    Auipc,
    Jal,
    Jalr,
    Branch,
    Load,
    Store,
    OpImm,
    Op,
    System,
}

impl Opcode {
    const LUI: u32 = 0b0110111; // 0x37
    const AUIPC: u32 = 0b0010111; // 0x17
    const JAL: u32 = 0b1101111; // 0x6F
    const JALR: u32 = 0b1100111; // 0x67
    const BRANCH: u32 = 0b1100011; // 0x63
    const LOAD: u32 = 0b0000011; // 0x03
    const STORE: u32 = 0b0100011; // 0x23
    const OP_IMM: u32 = 0b0010011; // 0x13
    const OP: u32 = 0b0110011; // 0x33
    const SYSTEM: u32 = 0b1110011; // 0x73

    /// Classifies a 7-bit opcode, returning `None` when it is not recognized.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            Self::LUI => Some(Self::Lui),
            Self::AUIPC => Some(Self::Auipc),
            Self::JAL => Some(Self::Jal),
            Self::JALR => Some(Self::Jalr),
            Self::BRANCH => Some(Self::Branch),
            Self::LOAD => Some(Self::Load),
            Self::STORE => Some(Self::Store),
            Self::OP_IMM => Some(Self::OpImm),
            Self::OP => Some(Self::Op),
            Self::SYSTEM => Some(Self::System),
            _ => None,
        }
    }

    /// Returns the 7-bit encoding.
    pub const fn bits(&self) -> u32 {
        match self {
            Self::Lui => Self::LUI,
            Self::Auipc => Self::AUIPC,
            Self::Jal => Self::JAL,
            Self::Jalr => Self::JALR,
            Self::Branch => Self::BRANCH,
            Self::Load => Self::LOAD,
            Self::Store => Self::STORE,
            Self::OpImm => Self::OP_IMM,
            Self::Op => Self::OP,
            Self::System => Self::SYSTEM,
        }
    }

    /// Returns the instruction format this opcode is encoded in.
    pub const fn format(&self) -> Format {
        match self {
            Self::Op => Format::R,
            Self::Load | Self::OpImm | Self::Jalr | Self::System => Format::I,
            Self::Store => Format::S,
            Self::Branch => Format::B,
            Self::Lui | Self::Auipc => Format::U,
            Self::Jal => Format::J,
        }
    }

    /// Returns the ISA manual name of this opcode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lui => "LUI",
            Self::Auipc => "AUIPC",
            Self::Jal => "JAL",
            Self::Jalr => "JALR",
            Self::Branch => "BRANCH",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::OpImm => "OP-IMM",
            Self::Op => "OP",
            Self::System => "SYSTEM",
        }
    }
}

/// Base instruction formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
}

/// Register-register operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RType {
    pub opcode: Opcode,
    pub rd: Register,
    pub rs1: Register,
    pub rs2: Register,
    pub funct3: u8,
    pub funct7: u8,
}

/// Register-immediate operation, load, JALR or SYSTEM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IType {
    pub opcode: Opcode,
    pub rd: Register,
    pub rs1: Register,
    pub funct3: u8,
    /// 12-bit immediate, sign-extended.
    pub imm: i32,
    /// Shift amount for the immediate shift family (slli/srli/srai).
    pub shamt: Option<u8>,
}

/// Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SType {
    pub opcode: Opcode,
    pub rs1: Register,
    pub rs2: Register,
    pub funct3: u8,
    /// 12-bit immediate, sign-extended.
    pub imm: i32,
}

/// Conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BType {
    pub opcode: Opcode,
    pub rs1: Register,
    pub rs2: Register,
    pub funct3: u8,
    /// 13-bit even offset, sign-extended.
    pub imm: i32,
}

/// Upper-immediate (lui/auipc).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UType {
    pub opcode: Opcode,
    pub rd: Register,
    /// Upper 20 bits already shifted left by 12.
    pub imm: i32,
}

/// Jump and link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JType {
    pub opcode: Opcode,
    pub rd: Register,
    /// 21-bit even offset, sign-extended.
    pub imm: i32,
}

/// A decoded 32-bit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Instruction {
    R(RType),
    I(IType),
    S(SType),
    B(BType),
    U(UType),
    J(JType),
}

impl Instruction {
    /// Returns the major opcode.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::R(r) => r.opcode,
            Self::I(i) => i.opcode,
            Self::S(s) => s.opcode,
            Self::B(b) => b.opcode,
            Self::U(u) => u.opcode,
            Self::J(j) => j.opcode,
        }
    }

    /// Returns the encoding format.
    pub fn format(&self) -> Format {
        match self {
            Self::R(_) => Format::R,
            Self::I(_) => Format::I,
            Self::S(_) => Format::S,
            Self::B(_) => Format::B,
            Self::U(_) => Format::U,
            Self::J(_) => Format::J,
        }
    }

    /// Size in bytes. Always 4 for the base ISA.
    pub fn length(&self) -> usize {
        INSTRUCTION_SIZE
    }

    /// Destination register, for formats that have one.
    pub fn rd(&self) -> Option<Register> {
        match self {
            Self::R(r) => Some(r.rd),
            Self::I(i) => Some(i.rd),
            Self::U(u) => Some(u.rd),
            Self::J(j) => Some(j.rd),
            Self::S(_) | Self::B(_) => None,
        }
    }

    /// Immediate, for formats that have one.
    pub fn imm(&self) -> Option<i32> {
        match self {
            Self::R(_) => None,
            Self::I(i) => Some(i.imm),
            Self::S(s) => Some(s.imm),
            Self::B(b) => Some(b.imm),
            Self::U(u) => Some(u.imm),
            Self::J(j) => Some(j.imm),
        }
    }
}

impl BType {
    /// Taken-branch target for an instruction at `address`.
    pub fn target(&self, address: u64) -> u64 {
        address.wrapping_add_signed(self.imm as i64)
    }
}

impl JType {
    /// Jump target for an instruction at `address`.
    pub fn target(&self, address: u64) -> u64 {
        address.wrapping_add_signed(self.imm as i64)
    }
}
