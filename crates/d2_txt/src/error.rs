//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// a data line is missing the key/value separator
    #[error("separator is absent at line {line}")]
    SeparatorNotFound {
        /// 1-based line number of the offending line
        line: usize,
    },

    /// csv input without a detectable wrapping character
    #[error("csv strings are not wrapped in double quotes")]
    AmbiguousQuoting,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
