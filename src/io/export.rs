//! History export
//!
//! Writes a full statement history to a plain text file: all entries oldest
//! first, one per line, newline-terminated, no header and no trailing
//! metadata.

use crate::types::{LedgerError, StatementEntry};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write all entries to `path`, replacing any existing file
pub fn write_history(path: &Path, entries: &[StatementEntry]) -> Result<(), LedgerError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        writeln!(writer, "{entry}")?;
    }
    writer.flush()?;
    Ok(())
}
