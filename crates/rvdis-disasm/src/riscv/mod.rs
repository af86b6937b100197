//! RISC-V base integer instruction decoder.
//!
//! Decoding is split the way a host consumes it:
//! - `decoder`: window checks, opcode classification and field assembly
//! - `tables`: mnemonic lookup per format, which also defines legality
//! - `flow`: instruction length and control-flow edges
//! - `render`: token text with pseudo-instruction folding

mod decoder;
mod flow;
mod render;
mod tables;

pub use decoder::{decode, decode_word, RiscVDisassembler};
pub use flow::{indirect_target, instruction_info};
pub use render::instruction_text;
