// src/csv.rs
use std::io::{self, Write};

fn needs_quotes(cell: &str, sep: char) -> bool {
    cell.contains(sep) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

/// Write one CSV/TSV row. Cells holding the separator, quotes or line
/// breaks are quoted, inner quotes doubled.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{sep}")?; } else { first = false; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Header line (if any) followed by every row.
pub fn write_table<W: Write>(
    mut w: W,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> io::Result<()> {
    if let Some(h) = headers {
        write_row(&mut w, h, sep)?;
    }
    for r in rows {
        write_row(&mut w, r, sep)?;
    }
    Ok(())
}
