// src/output/writer.rs
//! Writes rendered text to its destination.

use crate::error::AppError;
use std::io::Write;

/// Writes one rendered block, making sure it ends with a newline, and
/// flushes so interactive users see it immediately.
pub fn write_block<W: Write>(out: &mut W, block: &str) -> Result<(), AppError> {
    out.write_all(block.as_bytes())?;
    if !block.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
