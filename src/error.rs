//! Error type shared by the table loaders and the configuration reader.
//!
//! Only initialisation can fail.  The per-sentence normalisation path is
//! total: it never returns an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Character map {path} truncated: header announces {expected} entries, found {found}")]
    TruncatedTable {
        path: PathBuf,
        expected: u64,
        found: u64,
    },

    #[error("Character map {path} contains an invalid code point {value:#x}")]
    InvalidCodePoint { path: PathBuf, value: u32 },

    #[error("Invalid normaliser config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Punctuation dictionary line {line}: {reason}")]
    Dictionary { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
