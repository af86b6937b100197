//! Integer register representation.

use std::fmt;

use crate::Error;

/// ABI display names for x0-x31.
const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", // x0-x7
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5", // x8-x15
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", // x16-x23
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6", // x24-x31
];

/// An integer register index, always in `0..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct Register(u8);

impl Register {
    /// x0, hardwired to zero.
    pub const ZERO: Self = Self(0);
    /// x1, return address.
    pub const RA: Self = Self(1);
    /// x2, stack pointer.
    pub const SP: Self = Self(2);

    /// Creates a register from a 5-bit instruction field.
    ///
    /// Only the low five bits of `field` are used.
    pub const fn from_field(field: u32) -> Self {
        Self((field & 0x1F) as u8)
    }

    /// Creates a register from an index, or `None` if it is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 32 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the register number (the `n` in `xn`).
    pub const fn index(&self) -> u8 {
        self.0
    }

    /// Returns true for x0.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the ABI name used for display.
    pub fn name(&self) -> &'static str {
        ABI_NAMES[self.0 as usize]
    }
}

impl TryFrom<u8> for Register {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(Error::InvalidRegister(index))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
