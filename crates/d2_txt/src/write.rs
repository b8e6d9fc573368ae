//! Types for writing tab-delimited text and CSV string tables

use std::io::Write;

use bon::Builder;
use d2_tbl::StringTable;
use tracing::instrument;

use crate::error::Result;

/// Column separator for the interchange formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Separator {
    /// Tab-delimited text
    #[default]
    Tab,
    /// CSV with a comma
    Comma,
    /// CSV with a semicolon
    Semicolon,
}

impl Separator {
    fn as_char(&self) -> char {
        match self {
            Separator::Tab => '\t',
            Separator::Comma => ',',
            Separator::Semicolon => ';',
        }
    }

    fn is_csv(&self) -> bool {
        !matches!(self, Separator::Tab)
    }
}

/// Options for how the interchange file should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct TextWriterOptions {
    /// The column separator to use; a comma or semicolon selects CSV conventions
    #[builder(default)]
    pub separator: Separator,

    /// Whether to wrap tab-delimited fields in double quotes.
    ///
    /// CSV fields are always wrapped regardless of this option.
    #[builder(default = true)]
    pub wrap_strings: bool,
}

/// Text/CSV table generator
///
/// ```
/// # fn doit() -> d2_txt::error::Result<()>
/// # {
/// use d2_tbl::StringTable;
/// use d2_txt::{Separator, TextTableWriter, TextWriterOptions};
///
/// let mut table = StringTable::default();
/// table.push("strhelp1", "Help");
///
/// let buf = TextTableWriter::new(
///     Vec::new(),
///     TextWriterOptions::builder()
///         .separator(Separator::Comma)
///         .build(),
/// )
/// .write_table(&table)?;
///
/// assert_eq!(buf, b"\"strhelp1\",\"Help\"\n");
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct TextTableWriter<W: Write> {
    inner: W,
    options: TextWriterOptions,
}

impl<W: Write> TextTableWriter<W> {
    /// Create a writer with the given formatting options.
    pub fn new(inner: W, options: TextWriterOptions) -> TextTableWriter<W> {
        TextTableWriter { inner, options }
    }

    /// Write a snapshot of the records, one line per record.
    ///
    /// Newlines inside values are escaped as the two-character sequence `\n` so every
    /// record stays on a single line. Output is UTF-8; no header line is written.
    #[instrument(skip_all, err, fields(records = table.len()))]
    pub fn write_table(mut self, table: &StringTable) -> Result<W> {
        let separator = self.options.separator.as_char();
        let wrap = if self.options.separator.is_csv() || self.options.wrap_strings {
            "\""
        } else {
            ""
        };

        for record in table.iter() {
            let value = record.value.replace('\n', "\\n");
            writeln!(
                self.inner,
                "{wrap}{key}{wrap}{separator}{wrap}{value}{wrap}",
                key = record.key,
            )?;
        }

        Ok(self.inner)
    }
}
