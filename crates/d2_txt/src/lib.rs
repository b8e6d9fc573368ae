//! This library handles the human-readable interchange formats for *Diablo II* string
//! tables: tab-delimited text and CSV.
//!
//! # Interchange Format Documentation
//!
//! Each line carries one record:
//!
//! ```text
//! [wrap]key[wrap]<separator>[wrap]value[wrap]
//! ```
//!
//! - `<separator>` is a tab for plain text files, or `,`/`;` for CSV.
//! - `[wrap]` is a double quote or nothing. Wrapping is optional for text files and
//!   detected per column from the first line; CSV strings are always wrapped, and the
//!   separator is whatever character follows the first wrapped field.
//! - Literal newlines inside a value are written as the two-character sequence `\n`
//!   and expanded back on read.
//! - A recognized header line (`Key`/`Value` or `String Index`/`Text`, wrapped and
//!   separated like the data lines) is skipped if present; none is ever written.
//!
//! A line without the expected separator aborts the whole import, reporting its
//! 1-based line number. Records are exchanged with the binary codec through
//! [`d2_tbl::StringTable`]; color markers pass through these formats untouched.

pub mod error;
pub mod read;
pub mod write;

pub use read::TextTableReader;
pub use write::{Separator, TextTableWriter, TextWriterOptions};
