//! RISC-V instruction decoder implementation.
//!
//! Implements RV32I field assembly, including the scattered B and J
//! immediates. Only the 32-bit base path decodes; other widths are reported
//! as unsupported.

use rvdis_core::bits::{self, sign_extend};
use rvdis_core::{
    BType, Format, IType, Instruction, JType, Opcode, RType, Register, SType, UType, Xlen,
    INSTRUCTION_SIZE,
};

use super::tables;
use crate::{DecodeError, DecodedInstruction, Disassembler};

/// RISC-V disassembler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiscVDisassembler {
    xlen: Xlen,
}

impl RiscVDisassembler {
    /// Creates a new RISC-V disassembler for RV32I.
    pub fn new() -> Self {
        Self { xlen: Xlen::Rv32 }
    }

    /// Creates a disassembler for the given register width.
    pub fn with_xlen(xlen: Xlen) -> Self {
        Self { xlen }
    }
}

impl Disassembler for RiscVDisassembler {
    fn decode_instruction(
        &self,
        bytes: &[u8],
        address: u64,
    ) -> Result<DecodedInstruction, DecodeError> {
        let raw = read_window(bytes, address)?;
        let instruction = decode_for(raw, address, self.xlen)?;
        Ok(DecodedInstruction {
            address,
            raw,
            instruction,
            size: INSTRUCTION_SIZE,
        })
    }

    fn min_instruction_size(&self) -> usize {
        INSTRUCTION_SIZE
    }

    fn max_instruction_size(&self) -> usize {
        INSTRUCTION_SIZE
    }

    fn is_fixed_width(&self) -> bool {
        true
    }

    fn xlen(&self) -> Xlen {
        self.xlen
    }
}

/// Decodes one 4-byte little-endian window at `address`.
///
/// Fails when the window is not exactly 4 bytes, the address is not 4-byte
/// aligned, the width has no decode path, or the word is not a legal base
/// instruction.
pub fn decode(bytes: &[u8], address: u64, xlen: Xlen) -> Result<Instruction, DecodeError> {
    let word = read_window(bytes, address)?;
    decode_for(word, address, xlen)
}

/// Checks the window shape and returns the little-endian word.
fn read_window(bytes: &[u8], address: u64) -> Result<u32, DecodeError> {
    let window: [u8; INSTRUCTION_SIZE] = bytes
        .try_into()
        .map_err(|_| DecodeError::truncated(address, INSTRUCTION_SIZE, bytes.len()))?;

    if address % INSTRUCTION_SIZE as u64 != 0 {
        return Err(DecodeError::misaligned(address));
    }

    Ok(u32::from_le_bytes(window))
}

fn decode_for(word: u32, address: u64, xlen: Xlen) -> Result<Instruction, DecodeError> {
    match xlen {
        Xlen::Rv32 => decode_word(word, address),
        other => Err(DecodeError::unsupported(
            address,
            format!("no decoder for {}", other),
        )),
    }
}

/// Decodes an RV32I instruction word.
///
/// The address is only used for error reporting; alignment is checked by
/// [`decode`].
pub fn decode_word(word: u32, address: u64) -> Result<Instruction, DecodeError> {
    let raw_opcode = bits::opcode(word);
    let opcode = Opcode::from_bits(raw_opcode)
        .ok_or_else(|| DecodeError::unknown_opcode(address, raw_opcode))?;

    let insn = match opcode.format() {
        Format::R => Instruction::R(decode_r(word, opcode)),
        Format::I => Instruction::I(decode_i(word, opcode)),
        Format::S => Instruction::S(decode_s(word, opcode)),
        Format::B => Instruction::B(decode_b(word, opcode)),
        Format::U => Instruction::U(decode_u(word, opcode)),
        Format::J => Instruction::J(decode_j(word, opcode)),
    };

    if tables::mnemonic(&insn).is_none() {
        return Err(DecodeError::invalid_encoding(
            address,
            raw_opcode,
            format!(
                "{} with funct3 {:#05b}, funct7 {:#09b}",
                opcode.name(),
                bits::funct3(word),
                bits::funct7(word)
            ),
        ));
    }

    Ok(insn)
}

fn decode_r(word: u32, opcode: Opcode) -> RType {
    RType {
        opcode,
        rd: Register::from_field(bits::rd(word)),
        rs1: Register::from_field(bits::rs1(word)),
        rs2: Register::from_field(bits::rs2(word)),
        funct3: bits::funct3(word) as u8,
        funct7: bits::funct7(word) as u8,
    }
}

fn decode_i(word: u32, opcode: Opcode) -> IType {
    let funct3 = bits::funct3(word);
    // imm[11:0] occupies the funct7 and rs2 positions
    let pattern = (bits::funct7(word) << 5) | bits::rs2(word);

    // slli/srli/srai: low 5 bits are the shift amount, the top 7 select
    // logical vs arithmetic
    let shamt = (opcode == Opcode::OpImm && matches!(funct3, 0b001 | 0b101))
        .then_some((pattern & 0x1F) as u8);

    IType {
        opcode,
        rd: Register::from_field(bits::rd(word)),
        rs1: Register::from_field(bits::rs1(word)),
        funct3: funct3 as u8,
        imm: sign_extend(pattern as u64, 12) as i32,
        shamt,
    }
}

fn decode_s(word: u32, opcode: Opcode) -> SType {
    // imm[11:5] in funct7, imm[4:0] in rd
    let pattern = (bits::funct7(word) << 5) | bits::rd(word);

    SType {
        opcode,
        rs1: Register::from_field(bits::rs1(word)),
        rs2: Register::from_field(bits::rs2(word)),
        funct3: bits::funct3(word) as u8,
        imm: sign_extend(pattern as u64, 12) as i32,
    }
}

fn decode_b(word: u32, opcode: Opcode) -> BType {
    let low = bits::rd(word); // imm[4:1|11]
    let high = bits::funct7(word); // imm[12|10:5]

    let imm12 = (high >> 6) & 1;
    let imm11 = low & 1;
    let imm10_5 = high & 0x3F;
    let imm4_1 = (low >> 1) & 0xF;
    let pattern = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);

    BType {
        opcode,
        rs1: Register::from_field(bits::rs1(word)),
        rs2: Register::from_field(bits::rs2(word)),
        funct3: bits::funct3(word) as u8,
        imm: sign_extend(pattern as u64, 13) as i32,
    }
}

fn decode_u(word: u32, opcode: Opcode) -> UType {
    UType {
        opcode,
        rd: Register::from_field(bits::rd(word)),
        imm: (bits::big_imm(word) << 12) as i32,
    }
}

fn decode_j(word: u32, opcode: Opcode) -> JType {
    // big immediate holds imm[20|10:1|11|19:12]
    let big = bits::big_imm(word);

    let imm20 = (big >> 19) & 1;
    let imm10_1 = (big >> 9) & 0x3FF;
    let imm11 = (big >> 8) & 1;
    let imm19_12 = big & 0xFF;
    let pattern = (imm20 << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);

    JType {
        opcode,
        rd: Register::from_field(bits::rd(word)),
        imm: sign_extend(pattern as u64, 21) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_at(word: u32, address: u64) -> Result<Instruction, DecodeError> {
        decode(&word.to_le_bytes(), address, Xlen::Rv32)
    }

    /// Encodes a B-type word with the given offset (must be even).
    fn encode_b(imm: i32, rs1: u32, rs2: u32, funct3: u32) -> u32 {
        let imm = imm as u32;
        let imm12 = (imm >> 12) & 1;
        let imm11 = (imm >> 11) & 1;
        let imm10_5 = (imm >> 5) & 0x3F;
        let imm4_1 = (imm >> 1) & 0xF;
        (imm12 << 31)
            | (imm10_5 << 25)
            | (rs2 << 20)
            | (rs1 << 15)
            | (funct3 << 12)
            | (imm4_1 << 8)
            | (imm11 << 7)
            | 0b1100011
    }

    /// Encodes a J-type word with the given offset (must be even).
    fn encode_j(imm: i32, rd: u32) -> u32 {
        let imm = imm as u32;
        let imm20 = (imm >> 20) & 1;
        let imm10_1 = (imm >> 1) & 0x3FF;
        let imm11 = (imm >> 11) & 1;
        let imm19_12 = (imm >> 12) & 0xFF;
        (imm20 << 31) | (imm10_1 << 21) | (imm11 << 20) | (imm19_12 << 12) | (rd << 7) | 0b1101111
    }

    #[test]
    fn test_nop() {
        let insn = decode_at(0x0000_0013, 0x1000).unwrap();
        let Instruction::I(i) = insn else {
            panic!("expected I-type, got {:?}", insn);
        };
        assert_eq!(i.opcode, Opcode::OpImm);
        assert_eq!(i.rd, Register::ZERO);
        assert_eq!(i.rs1, Register::ZERO);
        assert_eq!(i.imm, 0);
        assert_eq!(i.shamt, None);
    }

    #[test]
    fn test_add_sub() {
        // add x3, x1, x2
        let word: u32 = (2 << 20) | (1 << 15) | (3 << 7) | 0b0110011;
        let Instruction::R(r) = decode_at(word, 0).unwrap() else {
            panic!("expected R-type");
        };
        assert_eq!((r.rd.index(), r.rs1.index(), r.rs2.index()), (3, 1, 2));
        assert_eq!((r.funct3, r.funct7), (0, 0));

        let Instruction::R(r) = decode_at(word | (0b0100000 << 25), 0).unwrap() else {
            panic!("expected R-type");
        };
        assert_eq!(r.funct7, 0b0100000);
    }

    #[test]
    fn test_negative_i_immediate() {
        // addi sp, sp, -16
        let word: u32 = (0xFF0 << 20) | (2 << 15) | (2 << 7) | 0b0010011;
        let Instruction::I(i) = decode_at(word, 0).unwrap() else {
            panic!("expected I-type");
        };
        assert_eq!(i.imm, -16);
        assert_eq!(i.rd, Register::SP);
    }

    #[test]
    fn test_shift_amounts() {
        // srai a0, a0, 3
        let word: u32 =
            (0b0100000 << 25) | (3 << 20) | (10 << 15) | (0b101 << 12) | (10 << 7) | 0b0010011;
        let Instruction::I(i) = decode_at(word, 0).unwrap() else {
            panic!("expected I-type");
        };
        assert_eq!(i.shamt, Some(3));
        assert_eq!(i.imm, 0x403);

        // slli a0, a0, 31
        let word: u32 = (31 << 20) | (10 << 15) | (0b001 << 12) | (10 << 7) | 0b0010011;
        let Instruction::I(i) = decode_at(word, 0).unwrap() else {
            panic!("expected I-type");
        };
        assert_eq!(i.shamt, Some(31));

        // lhu shares funct3 101 but has no shift amount
        let word: u32 = (4 << 20) | (2 << 15) | (0b101 << 12) | (10 << 7) | 0b0000011;
        let Instruction::I(i) = decode_at(word, 0).unwrap() else {
            panic!("expected I-type");
        };
        assert_eq!(i.shamt, None);
        assert_eq!(i.imm, 4);
    }

    #[test]
    fn test_store_immediate() {
        // sw a0, -4(sp): imm = 0xFFC
        let imm: u32 = 0xFFC;
        let word: u32 = ((imm >> 5) << 25)
            | (10 << 20)
            | (2 << 15)
            | (0b010 << 12)
            | ((imm & 0x1F) << 7)
            | 0b0100011;
        let Instruction::S(s) = decode_at(word, 0).unwrap() else {
            panic!("expected S-type");
        };
        assert_eq!(s.imm, -4);
        assert_eq!(s.rs1, Register::SP);
        assert_eq!(s.rs2.index(), 10);
    }

    #[test]
    fn test_branch_immediates() {
        for imm in [0, 2, 8, -2, -8, 2046, 2048, 4094, -4096, -2048] {
            let word = encode_b(imm, 1, 2, 0b001);
            let Instruction::B(b) = decode_at(word, 0x4000).unwrap() else {
                panic!("expected B-type");
            };
            assert_eq!(b.imm, imm, "word {:#010x}", word);
            assert_eq!(b.imm & 1, 0);
        }
    }

    #[test]
    fn test_jump_immediates() {
        for imm in [0, 2, 0x7FE, 0x800, 0xFFFFE, -2, -0x800, -0x100000] {
            let word = encode_j(imm, 1);
            let Instruction::J(j) = decode_at(word, 0).unwrap() else {
                panic!("expected J-type");
            };
            assert_eq!(j.imm, imm, "word {:#010x}", word);
        }
    }

    #[test]
    fn test_upper_immediate() {
        // lui a0, 0x12345
        let Instruction::U(u) = decode_at(0x1234_5537, 0).unwrap() else {
            panic!("expected U-type");
        };
        assert_eq!(u.opcode, Opcode::Lui);
        assert_eq!(u.imm, 0x1234_5000);
        assert_eq!(u.rd.index(), 10);

        // auipc t0, 0xfffff
        let Instruction::U(u) = decode_at(0xFFFF_F297, 0).unwrap() else {
            panic!("expected U-type");
        };
        assert_eq!(u.opcode, Opcode::Auipc);
        assert_eq!(u.imm, -4096);
    }

    #[test]
    fn test_rejects_wrong_window_length() {
        let err = decode(&[0x13, 0x00, 0x00], 0x1000, Xlen::Rv32).unwrap_err();
        assert_eq!(err, DecodeError::truncated(0x1000, 4, 3));
        let err = decode(&[0x13, 0, 0, 0, 0], 0x1000, Xlen::Rv32).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { available: 5, .. }));
        assert!(decode(&[], 0, Xlen::Rv32).is_err());
    }

    #[test]
    fn test_rejects_misaligned() {
        assert_eq!(
            decode_at(0x0000_0013, 0x1001).unwrap_err(),
            DecodeError::misaligned(0x1001)
        );
        assert!(decode_at(0x0000_0013, 0x1002).is_err());
    }

    #[test]
    fn test_rejects_unknown_opcode() {
        let err = decode_at(0, 0).unwrap_err();
        assert_eq!(err, DecodeError::unknown_opcode(0, 0));
        // fence (MISC-MEM) is outside the base decode tables
        assert!(matches!(
            decode_at(0x0FF0_000F, 0),
            Err(DecodeError::UnknownOpcode { opcode: 0b0001111, .. })
        ));
    }

    #[test]
    fn test_rejects_illegal_sub_encodings() {
        // mul a0, a1, a2 (M extension funct7)
        let word: u32 = (1 << 25) | (12 << 20) | (11 << 15) | (10 << 7) | 0b0110011;
        assert!(matches!(
            decode_at(word, 0),
            Err(DecodeError::InvalidEncoding { opcode: 0b0110011, .. })
        ));
        // branch funct3 010
        assert!(decode_at(encode_b(8, 1, 2, 0b010), 0).is_err());
        // csrrw
        assert!(decode_at(0x3400_1073, 0).is_err());
        // store funct3 011 (sd)
        assert!(decode_at((0b011 << 12) | 0b0100011, 0).is_err());
        // jalr funct3 001
        assert!(decode_at((0b001 << 12) | 0b1100111, 0).is_err());
    }

    #[test]
    fn test_unsupported_width() {
        let bytes = 0x0000_0013u32.to_le_bytes();
        assert!(matches!(
            decode(&bytes, 0, Xlen::Rv64),
            Err(DecodeError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_decode_instruction_wrapper() {
        let disasm = RiscVDisassembler::new();
        let decoded = disasm
            .decode_instruction(&0x0000_0063u32.to_le_bytes(), 0x2000)
            .unwrap();
        assert_eq!(decoded.size, 4);
        assert_eq!(decoded.raw, 0x63);
        assert_eq!(decoded.address, 0x2000);
        assert_eq!(decoded.instruction.format(), Format::B);
    }
}
