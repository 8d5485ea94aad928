
use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;

use crate::table::Table;

/// Counts of what was written by [write_tables].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CsvStats {
    pub tables: usize,
    pub rows: usize,
}

/// Writes the rows of all `tables` in order as CSV records into `writer`.
///
/// Tables are not separated from each other, and rows may vary in length.
pub fn write_tables<W: Write>(writer: W, tables: &[Table]) -> Result<CsvStats> {
    let mut output = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(writer);

    let mut stats = CsvStats::default();
    for (table_index, table) in tables.iter().enumerate() {
        for (row_index, row) in table.iter().enumerate() {
            output
                .write_record(row.iter())
                .with_context(|| format!("writing table {table_index} row {row_index}"))?;
            stats.rows += 1;
        }
        stats.tables += 1;
    }

    output.flush().context("flushing CSV output")?;

    Ok(stats)
}

/// Writes `tables` as CSV to the file at `path`, replacing any existing file only once all data
/// has been written.
pub fn write_tables_to_path(path: &Path, tables: &[Table]) -> Result<CsvStats> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("opening {:?} for writing", path))?;

    let stats = write_tables(&mut file, tables)
        .with_context(|| format!("writing CSV data to {:?}", path))?;

    file.commit()
        .with_context(|| format!("committing CSV data to {:?}", path))?;

    Ok(stats)
}
