use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::record::{Column, ProjectRecord};

/// Comma-separated dump writer. Quoting is left to the record: free-text
/// fields arrive already cleaned and wrapped, everything else is written as-is.
pub struct DumpWriter<W: Write> {
    inner: Writer<W>,
    rows: usize,
}

impl DumpWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> DumpWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        let inner = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);
        DumpWriter { inner, rows: 0 }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.inner
            .write_record(Column::ALL.iter().map(|c| c.name()))
            .context("Failed to write header row")
    }

    pub fn write_project(&mut self, record: &ProjectRecord) -> Result<()> {
        debug_assert!(record.is_complete(), "record written before it was filled");
        self.inner
            .write_record(record.row())
            .context("Failed to write project row")?;
        self.rows += 1;
        Ok(())
    }

    /// Project rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().context("Failed to flush output")?;
        self.inner
            .into_inner()
            .map_err(|e| anyhow::Error::from(e.into_error()))
    }
}
