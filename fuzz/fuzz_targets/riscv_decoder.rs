#![no_main]

use libfuzzer_sys::fuzz_target;
use rvdis_core::Xlen;
use rvdis_disasm::traits::Disassembler;
use rvdis_disasm::RiscVDisassembler;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let disasm = RiscVDisassembler::new();

    // Single window at an aligned and a misaligned address
    let _ = disasm.instruction_info(&data[..4], 0x1000);
    let _ = disasm.instruction_text(&data[..4], 0x1002);

    // Unsupported widths must fail cleanly
    let _ = RiscVDisassembler::with_xlen(Xlen::Rv64).decode_instruction(&data[..4], 0x1000);

    // Linear sweep over the whole input
    for (index, result) in disasm.disassemble_block(data, 0x1000).into_iter().enumerate() {
        if let Ok(decoded) = result {
            assert_eq!(decoded.size, 4);
            assert_eq!(decoded.address, 0x1000 + index as u64 * 4);
            assert_eq!(decoded.info().length, 4);
            assert!(!decoded.text().tokens.is_empty());
        }
    }
});
