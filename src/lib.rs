//! huffpack: a byte-oriented Huffman codec.
//!
//! An encoding is a flat byte array with no magic number or length prefix:
//! - a preorder tree header (see [`tree`])
//! - the code of every input byte, followed by the end-marker code
//! - zero padding up to the next byte boundary
//!
//! The end marker is the reserved byte [`SENTINEL`]; inputs containing it
//! are rejected.

pub mod bits;
pub mod config;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod tree;

use tracing::debug;

use crate::bits::BitCursor;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffNode, HuffmanTree};

pub use crate::tree::{Code, CodeTable};

/// Reserved end-of-stream symbol (ASCII BEL). It is never valid input.
pub const SENTINEL: u8 = 0x07;

/// The codec engine
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data` into header bits, payload bits and zero padding.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let tree = self.build_tree(data)?;
        let codes = tree.code_table();

        let mut bits = Vec::new();
        tree.serialize(&mut bits);
        let header_bits = bits.len();

        for &symbol in data {
            // analyze() saw every input symbol, so each one has a code
            if let Some(code) = codes.get(symbol) {
                bits.extend_from_slice(code.bits());
            }
        }
        if let Some(end) = codes.get(SENTINEL) {
            bits.extend_from_slice(end.bits());
        }

        let output = bits::pack(&bits)?;
        debug!(
            input = data.len(),
            symbols = codes.len(),
            header_bits,
            payload_bits = bits.len() - header_bits,
            output = output.len(),
            "encoded"
        );
        Ok(output)
    }

    /// Decode bytes produced by [`HuffmanCodec::encode`].
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let bits = bits::unpack(data)?;
        let mut cursor = BitCursor::new(&bits);
        let tree = HuffmanTree::deserialize(&mut cursor)?;
        let header_bits = cursor.position();

        let root = tree.root();
        if let HuffNode::Leaf { symbol, .. } = root {
            if *symbol != SENTINEL {
                return Err(CodecError::InvalidTree);
            }
        }

        let mut output = Vec::new();
        let mut node = root;
        loop {
            match node {
                HuffNode::Leaf { symbol, .. } if *symbol == SENTINEL => break,
                HuffNode::Leaf { symbol, .. } => {
                    output.push(*symbol);
                    node = root;
                }
                HuffNode::Internal { left, right, .. } => {
                    let bit = cursor.next_bit().ok_or(CodecError::TruncatedPayload {
                        decoded: output.len(),
                    })?;
                    node = if bit { &**right } else { &**left };
                }
            }
        }

        debug!(
            input = data.len(),
            header_bits,
            padding_bits = cursor.remaining(),
            output = output.len(),
            "decoded"
        );
        Ok(output)
    }

    /// The codes `encode` would assign for `data`.
    pub fn code_table(&self, data: &[u8]) -> Result<CodeTable> {
        Ok(self.build_tree(data)?.code_table())
    }

    fn build_tree(&self, data: &[u8]) -> Result<HuffmanTree> {
        if data.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }
        let table = FrequencyTable::analyze(data)?;
        HuffmanTree::build(&table, self.config.sift_rule)
    }
}

/// Encode with the default configuration.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::default().encode(data)
}

/// Decode with the default configuration.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::default().decode(data)
}
