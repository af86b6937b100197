//! Error types for rvdis-core.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An architecture name that does not name a supported register width.
    #[error("unknown architecture '{0}' (expected riscv32, riscv64 or riscv128)")]
    UnknownArchitecture(String),

    /// A register index outside x0-x31.
    #[error("invalid register index {0} (expected 0-31)")]
    InvalidRegister(u8),
}
