use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::GenerationError;
use crate::value::GeneratedValue;

/// Write a header row and one row per record, returning the bytes written.
///
/// Rows must match `columns` in width; integrity of the values is not checked
/// here.
pub fn write_table_csv(
    path: &Path,
    columns: &[&str],
    rows: &[Vec<GeneratedValue>],
    null_marker: &str,
) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(columns)?;

    for row in rows {
        if row.len() != columns.len() {
            return Err(GenerationError::RowShape {
                table: table_label(path),
                expected: columns.len(),
                found: row.len(),
            });
        }
        writer.write_record(row.iter().map(|value| value.to_csv(null_marker)))?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

fn table_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("table")
        .to_string()
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
