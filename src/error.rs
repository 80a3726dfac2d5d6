//! Error types for huffpack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("bitstream ended at bit {bit_offset} while reading the tree header")]
    TruncatedHeader { bit_offset: usize },

    #[error("bitstream ended after {decoded} symbols without reaching the end marker")]
    TruncatedPayload { decoded: usize },

    #[error("symbol {symbol:#04x} at position {position} is reserved and cannot be encoded")]
    UnsupportedSymbol { symbol: u8, position: usize },

    #[error("pop from an empty heap while building the tree")]
    EmptyHeap,

    #[error("tree header describes a single leaf that is not the end marker")]
    InvalidTree,

    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
