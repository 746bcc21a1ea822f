//! All error types for the langstore crate.
//!
//! These are returned from all fallible operations (loading, flushing).
//! Line and row numbers in errors are 1-based, matching how editors count.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A non-blank line did not decompose into at least two `;`-separated
    /// fields. Fatal to the whole load.
    #[error("malformed record - line: `{line}`, locale: `{locale}`")]
    MalformedRecord { line: usize, locale: String },

    /// The same key appeared twice in one store file. Fatal to the whole load.
    #[error("translation key already defined (path: `{path}`, row: `{row}`, key: `{key}`)")]
    DuplicateKey {
        path: PathBuf,
        row: usize,
        key: String,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The atomic write primitive failed; pending keys were not consumed.
    #[error("write failure for `{path}`: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
