//! Bit packing between logical bit sequences and bytes.
//!
//! Bits are packed most-significant first and the final byte is padded
//! with zero bits.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::Result;

/// Packs `bits` into bytes, MSB first, zero-padding the last byte.
pub fn pack(bits: &[bool]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;
    Ok(writer.into_writer())
}

/// Expands every byte into its eight bits, MSB first.
pub fn unpack(bytes: &[u8]) -> Result<Vec<bool>> {
    let mut reader = BitReader::endian(bytes, BigEndian);
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for _ in 0..bytes.len() * 8 {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}

/// Appends the 8 bits of `value`, MSB first.
pub(crate) fn push_byte(bits: &mut Vec<bool>, value: u8) {
    for shift in (0..8).rev() {
        bits.push((value >> shift) & 1 == 1);
    }
}

/// Shared read position over an unpacked bit sequence.
#[derive(Debug)]
pub struct BitCursor<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a [bool]) -> Self {
        BitCursor { bits, pos: 0 }
    }

    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.pos).copied()?;
        self.pos += 1;
        Some(bit)
    }

    /// Reads eight bits as a byte. The cursor is left unchanged on failure.
    pub fn next_byte(&mut self) -> Option<u8> {
        let chunk = self.bits.get(self.pos..self.pos + 8)?;
        self.pos += 8;
        Some(chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}
