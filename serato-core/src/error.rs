//! Error types for serato-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Binary format error: {0}")]
    BinRw(String),

    #[error("Chunk header at offset {offset} needs 8 bytes but only {available} remain")]
    TruncatedHeader { offset: usize, available: usize },

    #[error("Chunk at offset {offset} declares {length} payload bytes but only {available} remain")]
    Truncated {
        offset: usize,
        length: u32,
        available: usize,
    },

    #[error("Invalid decode range {start}..{end} for buffer of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Chunk nesting deeper than {0} levels at offset {1}")]
    TooDeep(usize, usize),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<binrw::Error> for Error {
    fn from(e: binrw::Error) -> Self {
        Error::BinRw(e.to_string())
    }
}
