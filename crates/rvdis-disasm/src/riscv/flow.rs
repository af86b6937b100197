//! Control-flow edges derived from decoded instructions.

use rvdis_core::{Branch, BranchKind, Instruction, InstructionInfo, Opcode};

/// Derives length and branch edges for `insn` located at `address`.
///
/// Instructions that only fall through produce no edges.
pub fn instruction_info(insn: &Instruction, address: u64) -> InstructionInfo {
    let info = InstructionInfo::new(insn.length());

    match insn {
        Instruction::I(i) if i.opcode == Opcode::System => {
            if i.imm == 0 {
                info.with_branch(Branch::new(BranchKind::SystemCall))
            } else {
                info.with_branch(Branch::new(BranchKind::ExceptionBranch))
            }
        }
        Instruction::I(i) if i.opcode == Opcode::Jalr => {
            info.with_branch(Branch::new(BranchKind::IndirectBranch))
        }
        Instruction::B(b) => info
            .with_branch(Branch::to(BranchKind::TrueBranch, b.target(address)))
            .with_branch(Branch::to(
                BranchKind::FalseBranch,
                address.wrapping_add(insn.length() as u64),
            )),
        Instruction::J(j) => {
            info.with_branch(Branch::to(BranchKind::CallDestination, j.target(address)))
        }
        _ => info,
    }
}

/// JALR target given the runtime value of rs1: `(base + imm) & !1`.
pub fn indirect_target(base: u64, imm: i32) -> u64 {
    base.wrapping_add_signed(imm as i64) & !1
}
