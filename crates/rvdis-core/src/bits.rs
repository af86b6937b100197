//! Bit-field accessors for 32-bit instruction words.
//!
//! Field positions follow the base-ISA layout:
//!
//! ```text
//!  31      25 24  20 19  15 14 12 11   7 6      0
//! | funct7   | rs2  | rs1  | f3  |  rd  | opcode |
//! |        big immediate         |  rd  | opcode |
//! ```
//!
//! All accessors are total: every 32-bit word has a value for every field.

/// Opcode, bits 6:0.
pub const fn opcode(word: u32) -> u32 {
    word & 0x7F
}

/// Destination register field, bits 11:7.
pub const fn rd(word: u32) -> u32 {
    (word >> 7) & 0x1F
}

/// funct3, bits 14:12.
pub const fn funct3(word: u32) -> u32 {
    (word >> 12) & 0x7
}

/// First source register field, bits 19:15.
pub const fn rs1(word: u32) -> u32 {
    (word >> 15) & 0x1F
}

/// Second source register field, bits 24:20.
pub const fn rs2(word: u32) -> u32 {
    (word >> 20) & 0x1F
}

/// funct7, bits 31:25.
pub const fn funct7(word: u32) -> u32 {
    (word >> 25) & 0x7F
}

/// Upper 20 bits (31:12), unsigned.
pub const fn big_imm(word: u32) -> u32 {
    word >> 12
}

/// Interprets the low `width` bits of `value` as two's complement.
///
/// Bits above `width` are ignored. A width of zero yields zero and widths of
/// 64 or more return the value reinterpreted as-is.
pub const fn sign_extend(value: u64, width: u32) -> i64 {
    if width == 0 {
        return 0;
    }
    if width >= 64 {
        return value as i64;
    }
    let shift = 64 - width;
    ((value << shift) as i64) >> shift
}
