//! Disassembly error types.

use thiserror::Error;

/// Error type for instruction decoding.
///
/// Every variant describes a single 4-byte window; none of them affect the
/// decoding of any other window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The window is not exactly one instruction long.
    #[error("truncated instruction at {address:#x}: need {needed} bytes, have {available}")]
    Truncated {
        address: u64,
        needed: usize,
        available: usize,
    },

    /// The address is not instruction aligned.
    #[error("misaligned instruction address {address:#x}")]
    Misaligned { address: u64 },

    /// The 7-bit opcode belongs to no known format.
    #[error("unknown opcode {opcode:#09b} at {address:#x}")]
    UnknownOpcode { address: u64, opcode: u32 },

    /// The opcode is known but the funct3/funct7/immediate combination is not.
    #[error("invalid encoding at {address:#x} (opcode {opcode:#09b}): {reason}")]
    InvalidEncoding {
        address: u64,
        opcode: u32,
        reason: String,
    },

    /// Decoding is not available for the requested variant.
    #[error("unsupported instruction at {address:#x}: {reason}")]
    Unsupported { address: u64, reason: String },
}

impl DecodeError {
    /// Creates a new Truncated error.
    pub fn truncated(address: u64, needed: usize, available: usize) -> Self {
        Self::Truncated {
            address,
            needed,
            available,
        }
    }

    /// Creates a new Misaligned error.
    pub fn misaligned(address: u64) -> Self {
        Self::Misaligned { address }
    }

    /// Creates a new UnknownOpcode error.
    pub fn unknown_opcode(address: u64, opcode: u32) -> Self {
        Self::UnknownOpcode { address, opcode }
    }

    /// Creates a new InvalidEncoding error.
    pub fn invalid_encoding(address: u64, opcode: u32, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            address,
            opcode,
            reason: reason.into(),
        }
    }

    /// Creates a new Unsupported error.
    pub fn unsupported(address: u64, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            address,
            reason: reason.into(),
        }
    }

    /// Address of the window that failed to decode.
    pub fn address(&self) -> u64 {
        match self {
            Self::Truncated { address, .. }
            | Self::Misaligned { address }
            | Self::UnknownOpcode { address, .. }
            | Self::InvalidEncoding { address, .. }
            | Self::Unsupported { address, .. } => *address,
        }
    }
}
