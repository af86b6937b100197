//! Mnemonic tables, one per format.
//!
//! A record whose sub-encoding is missing from these tables is not a legal
//! base instruction; the decoder rejects it before anyone renders it.

use rvdis_core::{BType, IType, Instruction, Opcode, RType, SType};

const FUNCT7_BASE: u8 = 0b0000000;
const FUNCT7_ALT: u8 = 0b0100000;

/// Canonical (unfolded) mnemonic, or `None` for an illegal encoding.
pub(super) fn mnemonic(insn: &Instruction) -> Option<&'static str> {
    match insn {
        Instruction::R(r) => op(r),
        Instruction::I(i) => match i.opcode {
            Opcode::Load => load(i.funct3),
            Opcode::OpImm => op_imm(i),
            Opcode::Jalr => (i.funct3 == 0).then_some("jalr"),
            Opcode::System => system(i),
            _ => None,
        },
        Instruction::S(s) => store(s),
        Instruction::B(b) => branch(b),
        Instruction::U(u) => match u.opcode {
            Opcode::Lui => Some("lui"),
            Opcode::Auipc => Some("auipc"),
            _ => None,
        },
        Instruction::J(j) => (j.opcode == Opcode::Jal).then_some("jal"),
    }
}

fn op(r: &RType) -> Option<&'static str> {
    match (r.funct3, r.funct7) {
        (0b000, FUNCT7_BASE) => Some("add"),
        (0b000, FUNCT7_ALT) => Some("sub"),
        (0b001, FUNCT7_BASE) => Some("sll"),
        (0b010, FUNCT7_BASE) => Some("slt"),
        (0b011, FUNCT7_BASE) => Some("sltu"),
        (0b100, FUNCT7_BASE) => Some("xor"),
        (0b101, FUNCT7_BASE) => Some("srl"),
        (0b101, FUNCT7_ALT) => Some("sra"),
        (0b110, FUNCT7_BASE) => Some("or"),
        (0b111, FUNCT7_BASE) => Some("and"),
        _ => None,
    }
}

fn load(funct3: u8) -> Option<&'static str> {
    match funct3 {
        0b000 => Some("lb"),
        0b001 => Some("lh"),
        0b010 => Some("lw"),
        0b100 => Some("lbu"),
        0b101 => Some("lhu"),
        _ => None,
    }
}

fn op_imm(i: &IType) -> Option<&'static str> {
    // top 7 bits of the 12-bit immediate sit where funct7 would be
    let upper = ((i.imm >> 5) & 0x7F) as u8;
    match (i.funct3, upper) {
        (0b000, _) => Some("addi"),
        (0b010, _) => Some("slti"),
        (0b011, _) => Some("sltiu"),
        (0b100, _) => Some("xori"),
        (0b110, _) => Some("ori"),
        (0b111, _) => Some("andi"),
        (0b001, FUNCT7_BASE) => Some("slli"),
        (0b101, FUNCT7_BASE) => Some("srli"),
        (0b101, FUNCT7_ALT) => Some("srai"),
        _ => None,
    }
}

fn system(i: &IType) -> Option<&'static str> {
    if i.funct3 != 0 || !i.rd.is_zero() || !i.rs1.is_zero() {
        return None;
    }
    match i.imm {
        0 => Some("ecall"),
        1 => Some("ebreak"),
        _ => None,
    }
}

fn store(s: &SType) -> Option<&'static str> {
    match s.funct3 {
        0b000 => Some("sb"),
        0b001 => Some("sh"),
        0b010 => Some("sw"),
        _ => None,
    }
}

fn branch(b: &BType) -> Option<&'static str> {
    match b.funct3 {
        0b000 => Some("beq"),
        0b001 => Some("bne"),
        0b100 => Some("blt"),
        0b101 => Some("bge"),
        0b110 => Some("bltu"),
        0b111 => Some("bgeu"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvdis_core::Register;

    fn op_imm_insn(funct3: u8, imm: i32) -> Instruction {
        Instruction::I(IType {
            opcode: Opcode::OpImm,
            rd: Register::from_field(10),
            rs1: Register::from_field(10),
            funct3,
            imm,
            shamt: Some((imm & 0x1F) as u8),
        })
    }

    #[test]
    fn test_shift_discriminator() {
        assert_eq!(mnemonic(&op_imm_insn(0b101, 0x003)), Some("srli"));
        assert_eq!(mnemonic(&op_imm_insn(0b101, 0x403)), Some("srai"));
        assert_eq!(mnemonic(&op_imm_insn(0b001, 0x01F)), Some("slli"));
        assert_eq!(mnemonic(&op_imm_insn(0b001, 0x41F)), None);
        // top bits 1111111 (negative pattern) is not a shift encoding
        assert_eq!(mnemonic(&op_imm_insn(0b101, -1)), None);
    }

    #[test]
    fn test_r_table_is_exact() {
        let legal = (0..8u8)
            .flat_map(|f3| (0..128u8).map(move |f7| (f3, f7)))
            .filter(|&(funct3, funct7)| {
                op(&RType {
                    opcode: Opcode::Op,
                    rd: Register::ZERO,
                    rs1: Register::ZERO,
                    rs2: Register::ZERO,
                    funct3,
                    funct7,
                })
                .is_some()
            })
            .count();
        assert_eq!(legal, 10);
    }

    #[test]
    fn test_system_exact_immediates() {
        let sys = |imm: i32, rd: u32| {
            Instruction::I(IType {
                opcode: Opcode::System,
                rd: Register::from_field(rd),
                rs1: Register::ZERO,
                funct3: 0,
                imm,
                shamt: None,
            })
        };
        assert_eq!(mnemonic(&sys(0, 0)), Some("ecall"));
        assert_eq!(mnemonic(&sys(1, 0)), Some("ebreak"));
        assert_eq!(mnemonic(&sys(0x105, 0)), None); // wfi
        assert_eq!(mnemonic(&sys(0, 1)), None);
    }
}
