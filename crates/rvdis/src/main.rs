//! rvdis - A RISC-V disassembler for flat binary images
//!
//! Usage:
//!   rvdis <image>                 Disassemble the whole image at address 0
//!   rvdis <image> -b 0x80000000   Disassemble with a load address
//!   rvdis <image> --info          Also print control-flow edges
//!   rvdis <image> --json          Emit one JSON object per instruction

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use rvdis_core::{Branch, InstructionInfo, Token, Xlen};
use rvdis_disasm::{DecodeError, DecodedInstruction, Disassembler, RiscVDisassembler};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rvdis", version)]
#[command(about = "A RISC-V base-ISA disassembler for flat binary images", long_about = None)]
struct Cli {
    /// Path to the raw image (little-endian instruction words)
    image: PathBuf,

    /// Load address of the first disassembled byte (hex)
    #[arg(short, long, value_parser = parse_hex, default_value = "0")]
    base: u64,

    /// Byte offset into the image to start at (hex)
    #[arg(short, long, value_parser = parse_hex, default_value = "0")]
    offset: u64,

    /// Maximum number of instructions to disassemble
    #[arg(short, long)]
    count: Option<usize>,

    /// Register width: riscv32, riscv64 or riscv128
    #[arg(short, long, default_value = "riscv32")]
    xlen: Xlen,

    /// Print control-flow edges after each instruction
    #[arg(short, long)]
    info: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_hex(s: &str) -> Result<u64, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| e.to_string())
}

/// JSON representation of one decoded window.
#[derive(Serialize)]
struct JsonInstruction<'a> {
    address: u64,
    bytes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'a [Token]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<&'a InstructionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data = fs::read(&cli.image)
        .with_context(|| format!("Failed to read image: {}", cli.image.display()))?;

    let offset = usize::try_from(cli.offset).context("Offset does not fit in memory")?;
    if offset > data.len() {
        bail!(
            "Offset {:#x} is past the end of the image ({:#x} bytes)",
            offset,
            data.len()
        );
    }

    let disasm = RiscVDisassembler::with_xlen(cli.xlen);
    let step = disasm.max_instruction_size();

    let mut code = &data[offset..];
    if let Some(count) = cli.count {
        code = &code[..code.len().min(count.saturating_mul(step))];
    }

    if cli.base % step as u64 != 0 {
        warn!("base address {:#x} is not {}-byte aligned", cli.base, step);
    }
    debug!(
        "disassembling {} bytes of {} at {:#x} as {}",
        code.len(),
        cli.image.display(),
        cli.base,
        cli.xlen
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (result, window) in disasm
        .disassemble_block(code, cli.base)
        .into_iter()
        .zip(code.chunks(step))
    {
        if cli.json {
            write_json(&mut out, &result, window)?;
        } else {
            write_text(&mut out, &result, window, cli.info)?;
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn hex_bytes(window: &[u8]) -> String {
    window
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_branch(branch: &Branch) -> String {
    match branch.target {
        Some(target) => format!("{} {:#x}", branch.kind.name(), target),
        None => branch.kind.name().to_string(),
    }
}

fn write_text(
    out: &mut impl Write,
    result: &Result<DecodedInstruction, DecodeError>,
    window: &[u8],
    show_info: bool,
) -> Result<()> {
    match result {
        Ok(decoded) => {
            write!(
                out,
                "{:#010x}:  {:<12} {}",
                decoded.address,
                hex_bytes(window),
                decoded.text()
            )?;
            if show_info {
                let info = decoded.info();
                if !info.is_sequential() {
                    let edges: Vec<_> = info.branches.iter().map(format_branch).collect();
                    write!(out, "  ; {}", edges.join(", "))?;
                }
            }
            writeln!(out)?;
        }
        Err(e) => {
            debug!("{}", e);
            writeln!(out, "{:#010x}:  {:<12} (bad)", e.address(), hex_bytes(window))?;
        }
    }
    Ok(())
}

fn write_json(
    out: &mut impl Write,
    result: &Result<DecodedInstruction, DecodeError>,
    window: &[u8],
) -> Result<()> {
    let line = match result {
        Ok(decoded) => {
            let text = decoded.text();
            let info = decoded.info();
            let record = JsonInstruction {
                address: decoded.address,
                bytes: hex_bytes(window),
                text: Some(text.to_string()),
                tokens: Some(&text.tokens),
                info: Some(&info),
                error: None,
            };
            serde_json::to_string(&record)?
        }
        Err(e) => {
            let record = JsonInstruction {
                address: e.address(),
                bytes: hex_bytes(window),
                text: None,
                tokens: None,
                info: None,
                error: Some(e.to_string()),
            };
            serde_json::to_string(&record)?
        }
    };
    writeln!(out, "{}", line)?;
    Ok(())
}
