//! JSON output formatting

use std::io::{self, Write};

use super::Report;

/// Write the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::other)?;
    writeln!(out)
}

/// Print the report as pretty-printed JSON to stdout.
pub fn print_json(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_json(&mut lock, report)
}
