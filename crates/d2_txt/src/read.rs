//! Types for reading tab-delimited text and CSV string tables

use std::io::Read;

use d2_tbl::StringTable;
use tracing::instrument;

use crate::error::{Error, Result};

/// Text/CSV table reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_entries(reader: impl Read) -> d2_txt::error::Result<()> {
///     let table = d2_txt::TextTableReader::new(reader, false)?.into_table();
///
///     for record in table.iter() {
///         println!("{}: {}", record.key, record.value);
///     }
///
///     Ok(())
/// }
/// ```
pub struct TextTableReader {
    table: StringTable,
}

impl TextTableReader {
    /// Read an interchange file to its end and parse it.
    ///
    /// `csv_hint` marks sources that are CSV by name (file extension); quoted CSV
    /// content is also recognized without the hint.
    pub fn new<R: Read>(mut reader: R, csv_hint: bool) -> Result<TextTableReader> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_str(&input, csv_hint)
    }

    /// Parse an interchange file from a string.
    ///
    /// The whole import is rejected on the first malformed line; on success the prior
    /// table state of the caller is simply replaced by the returned records.
    #[instrument(skip(input), err, fields(size = input.len()))]
    pub fn from_str(input: &str, csv_hint: bool) -> Result<TextTableReader> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

        let mut lines: Vec<&str> = input.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Ok(TextTableReader {
                table: StringTable::default(),
            });
        }

        let first = lines[0];
        let (separator, wrap_key, wrap_value) =
            if csv_hint || first.contains("\",\"") || first.contains("\";\"") {
                // csv: every field is wrapped, and whatever follows the first wrapped
                // field is the separator
                if !first.starts_with('"') {
                    return Err(Error::AmbiguousQuoting);
                }
                let second_quote = first[1..].find('"').map(|i| i + 1).ok_or(Error::AmbiguousQuoting)?;
                let separator = first[second_quote + 1..]
                    .chars()
                    .next()
                    .ok_or(Error::AmbiguousQuoting)?;
                (separator, "\"", "\"")
            } else {
                // plain text: sniff the wrapping per column from the first line
                let mut wrap_key = "";
                let mut wrap_value = "";
                if let Some((key, value)) = first.split_once('\t') {
                    if is_wrapped(key) {
                        wrap_key = "\"";
                    }
                    if is_wrapped(value) {
                        wrap_value = "\"";
                    }
                }
                ('\t', wrap_key, wrap_value)
            };

        let kv_separator = format!("{wrap_key}{separator}{wrap_value}");
        let edit_header = format!("{wrap_key}Key{wrap_key}{separator}{wrap_value}Value{wrap_value}");
        let legacy_header =
            format!("{wrap_key}String Index{wrap_key}{separator}{wrap_value}Text{wrap_value}");

        let mut table = StringTable::default();
        for (i, line) in lines.iter().enumerate() {
            if i == 0 && (*line == edit_header || *line == legacy_header) {
                continue;
            }

            let (key, value) = line
                .split_once(&kv_separator)
                .ok_or(Error::SeparatorNotFound { line: i + 1 })?;
            let key = key.strip_prefix(wrap_key).unwrap_or(key);
            let value = value.strip_suffix(wrap_value).unwrap_or(value);

            table.push(key, value.replace("\\n", "\n"));
        }

        Ok(TextTableReader { table })
    }

    /// Number of records contained in this file.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether this file contains no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a reference to the parsed records in file order
    pub fn table(&self) -> &StringTable {
        &self.table
    }

    /// Consume the reader, returning the parsed records
    pub fn into_table(self) -> StringTable {
        self.table
    }
}

fn is_wrapped(field: &str) -> bool {
    field.len() >= 2 && field.starts_with('"') && field.ends_with('"')
}
