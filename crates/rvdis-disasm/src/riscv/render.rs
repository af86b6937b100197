//! Instruction text rendering.
//!
//! Output follows GNU assembler syntax with ABI register names, folding a few
//! canonical encodings into their pseudo-instructions:
//! - `addi rd, zero, imm` → `li rd, imm`
//! - `jalr zero, ...` → `ret`
//! - `jal zero, target` → `j target`

use rvdis_core::{Instruction, InstructionText, Opcode, Register, Token};

use super::tables;

/// Renders `insn` located at `address` as a token sequence.
///
/// Every record produced by the decoder has a mnemonic. A hand-built record
/// whose fields match no table entry (for example a SYSTEM record with an
/// immediate other than 0 or 1) renders as a bare `unimp` with no operands.
pub fn instruction_text(insn: &Instruction, address: u64) -> InstructionText {
    let Some(mnemonic) = tables::mnemonic(insn) else {
        return TextBuilder::new("unimp").finish(insn.length());
    };

    let text = match insn {
        Instruction::R(r) => TextBuilder::new(mnemonic).reg(r.rd).reg(r.rs1).reg(r.rs2),
        Instruction::I(i) => match i.opcode {
            Opcode::Load => TextBuilder::new(mnemonic).reg(i.rd).mem(i.imm, i.rs1),
            Opcode::Jalr if i.rd.is_zero() => TextBuilder::new("ret"),
            Opcode::Jalr => TextBuilder::new(mnemonic).reg(i.rd).mem(i.imm, i.rs1),
            Opcode::System => TextBuilder::new(mnemonic),
            _ => match i.shamt {
                Some(shamt) => TextBuilder::new(mnemonic)
                    .reg(i.rd)
                    .reg(i.rs1)
                    .int(shamt as i64),
                None if i.funct3 == 0 && i.rs1.is_zero() => {
                    TextBuilder::new("li").reg(i.rd).int(i.imm as i64)
                }
                None => TextBuilder::new(mnemonic)
                    .reg(i.rd)
                    .reg(i.rs1)
                    .int(i.imm as i64),
            },
        },
        Instruction::S(s) => TextBuilder::new(mnemonic).reg(s.rs2).mem(s.imm, s.rs1),
        Instruction::B(b) => TextBuilder::new(mnemonic)
            .reg(b.rs1)
            .reg(b.rs2)
            .addr(b.target(address)),
        Instruction::U(u) => TextBuilder::new(mnemonic).reg(u.rd).int(u.imm as i64),
        Instruction::J(j) if j.rd.is_zero() => TextBuilder::new("j").addr(j.target(address)),
        Instruction::J(j) => TextBuilder::new(mnemonic).reg(j.rd).addr(j.target(address)),
    };

    text.finish(insn.length())
}

/// Accumulates tokens, inserting separators between operands.
struct TextBuilder {
    tokens: Vec<Token>,
    operands: usize,
}

impl TextBuilder {
    fn new(mnemonic: &str) -> Self {
        Self {
            tokens: vec![Token::mnemonic(mnemonic)],
            operands: 0,
        }
    }

    fn separate(&mut self) {
        let sep = if self.operands == 0 { " " } else { ", " };
        self.tokens.push(Token::separator(sep));
        self.operands += 1;
    }

    fn reg(mut self, reg: Register) -> Self {
        self.separate();
        self.tokens.push(Token::register(reg.name()));
        self
    }

    fn int(mut self, value: i64) -> Self {
        self.separate();
        self.tokens.push(Token::integer(value));
        self
    }

    fn addr(mut self, target: u64) -> Self {
        self.separate();
        self.tokens.push(Token::address(target));
        self
    }

    /// `imm(base)`
    fn mem(mut self, imm: i32, base: Register) -> Self {
        self.separate();
        self.tokens.push(Token::integer(imm as i64));
        self.tokens.push(Token::memory_begin());
        self.tokens.push(Token::register(base.name()));
        self.tokens.push(Token::memory_end());
        self
    }

    fn finish(self, length: usize) -> InstructionText {
        InstructionText {
            tokens: self.tokens,
            length,
        }
    }
}
