//! Symbol frequency analysis.

use std::collections::BTreeMap;

use crate::error::{CodecError, Result};
use crate::SENTINEL;

/// Symbol counts, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Counts every byte of `data`, rejecting the reserved end marker.
    pub fn analyze(data: &[u8]) -> Result<Self> {
        let mut counts = BTreeMap::new();
        for (position, &symbol) in data.iter().enumerate() {
            if symbol == SENTINEL {
                return Err(CodecError::UnsupportedSymbol { symbol, position });
            }
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Ok(FrequencyTable { counts })
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::analyze(b"abracadabra").unwrap();
        assert_eq!(table.get(b'a'), Some(5));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'r'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.get(b'd'), Some(1));
        assert_eq!(table.get(b'z'), None);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_ascending_iteration() {
        let table = FrequencyTable::analyze(b"zyxzyz").unwrap();
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'x', b'y', b'z']);
    }

    #[test]
    fn test_order_independent() {
        let a = FrequencyTable::analyze(b"hello world").unwrap();
        let b = FrequencyTable::analyze(b"dlrow olleh").unwrap();
        let c = FrequencyTable::analyze(b"lloo hewrld").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::analyze(b"").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_sentinel_rejected() {
        let data = [b'a', b'b', SENTINEL, b'c'];
        match FrequencyTable::analyze(&data) {
            Err(CodecError::UnsupportedSymbol { symbol, position }) => {
                assert_eq!(symbol, SENTINEL);
                assert_eq!(position, 2);
            }
            other => panic!("expected UnsupportedSymbol, got {:?}", other),
        }
    }
}
