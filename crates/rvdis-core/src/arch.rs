//! Register width selection.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Integer register width (XLEN) of a RISC-V variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Xlen {
    /// RV32
    #[default]
    Rv32,
    /// RV64
    Rv64,
    /// RV128
    Rv128,
}

impl Xlen {
    /// Returns the register size in bytes.
    pub fn bytes(&self) -> usize {
        match self {
            Self::Rv32 => 4,
            Self::Rv64 => 8,
            Self::Rv128 => 16,
        }
    }

    /// Returns the register size in bits.
    pub fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Returns the architecture name for this width.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rv32 => "riscv32",
            Self::Rv64 => "riscv64",
            Self::Rv128 => "riscv128",
        }
    }
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Xlen {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "riscv32" | "rv32" | "32" => Ok(Self::Rv32),
            "riscv64" | "rv64" | "64" => Ok(Self::Rv64),
            "riscv128" | "rv128" | "128" => Ok(Self::Rv128),
            _ => Err(Error::UnknownArchitecture(s.to_string())),
        }
    }
}
