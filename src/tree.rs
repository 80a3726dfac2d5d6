//! Huffman tree construction, code derivation and the preorder header format.
//!
//! Header layout, preorder: an internal node is a single `0` bit followed by
//! its left then right subtree; a leaf is a `1` bit followed by its symbol as
//! eight bits. The header is self-delimiting.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::bits::{push_byte, BitCursor};
use crate::config::SiftRule;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::heap::MinHeap;
use crate::SENTINEL;

/// Deepest nesting a header may describe. With at most 256 distinct leaves
/// no well-formed tree is deeper than 255.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

// Heap order is by weight alone; ties are settled by heap position.
impl Eq for HuffNode {}
impl PartialEq for HuffNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight() == other.weight()
    }
}
impl PartialOrd for HuffNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HuffNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

/// A root-to-leaf path: `false` descends left, `true` descends right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree for `table` plus one end-marker leaf of weight 1.
    pub fn build(table: &FrequencyTable, rule: SiftRule) -> Result<Self> {
        let mut heap = MinHeap::with_rule(rule);
        for (symbol, count) in table.iter() {
            heap.push(HuffNode::leaf(symbol, count));
        }
        heap.push(HuffNode::leaf(SENTINEL, 1));

        loop {
            let a = heap.pop().ok_or(CodecError::EmptyHeap)?;
            let Some(b) = heap.pop() else {
                trace!(weight = a.weight(), "tree complete");
                return Ok(HuffmanTree { root: a });
            };
            heap.push(HuffNode::merge(a, b));
        }
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &HuffNode) -> usize {
            match node {
                HuffNode::Leaf { .. } => 1,
                HuffNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    pub fn code_table(&self) -> CodeTable {
        let mut codes = BTreeMap::new();
        let mut path = Vec::new();
        collect_codes(&self.root, &mut path, &mut codes);
        CodeTable { codes }
    }

    /// Appends the preorder header bits for this tree to `out`.
    pub fn serialize(&self, out: &mut Vec<bool>) {
        serialize_node(&self.root, out);
    }

    /// Rebuilds a tree from the header at the cursor, leaving the cursor on
    /// the first bit after the header. Leaf weights are not stored and read
    /// back as zero.
    pub fn deserialize(cursor: &mut BitCursor<'_>) -> Result<Self> {
        let root = deserialize_node(cursor, 0)?;
        Ok(HuffmanTree { root })
    }
}

fn collect_codes(node: &HuffNode, path: &mut Vec<bool>, codes: &mut BTreeMap<u8, Code>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(path.clone()));
        }
        HuffNode::Internal { left, right, .. } => {
            path.push(false);
            collect_codes(left, path, codes);
            path.pop();
            path.push(true);
            collect_codes(right, path, codes);
            path.pop();
        }
    }
}

fn serialize_node(node: &HuffNode, out: &mut Vec<bool>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            out.push(true);
            push_byte(out, *symbol);
        }
        HuffNode::Internal { left, right, .. } => {
            out.push(false);
            serialize_node(left, out);
            serialize_node(right, out);
        }
    }
}

fn deserialize_node(cursor: &mut BitCursor<'_>, depth: usize) -> Result<HuffNode> {
    if depth > MAX_DEPTH {
        return Err(CodecError::InvalidTree);
    }
    let truncated = |cursor: &BitCursor<'_>| CodecError::TruncatedHeader {
        bit_offset: cursor.position(),
    };

    if cursor.next_bit().ok_or_else(|| truncated(cursor))? {
        let symbol = cursor.next_byte().ok_or_else(|| truncated(cursor))?;
        return Ok(HuffNode::leaf(symbol, 0));
    }
    let left = deserialize_node(cursor, depth + 1)?;
    let right = deserialize_node(cursor, depth + 1)?;
    Ok(HuffNode::merge(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        let table = FrequencyTable::analyze(data).unwrap();
        HuffmanTree::build(&table, SiftRule::Reference).unwrap()
    }

    fn is_prefix_free(table: &CodeTable) -> bool {
        let codes: Vec<&Code> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j && b.bits().starts_with(a.bits()) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_single_symbol_tree() {
        let tree = tree_for(b"aaaa");
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.root().weight(), 5);

        let codes = tree.code_table();
        assert_eq!(codes.get(SENTINEL).unwrap().to_string(), "0");
        assert_eq!(codes.get(b'a').unwrap().to_string(), "1");
    }

    #[test]
    fn test_empty_input_tree_is_lone_sentinel() {
        let tree = tree_for(b"");
        assert!(tree.root().is_leaf());
        let codes = tree.code_table();
        assert_eq!(codes.len(), 1);
        assert!(codes.get(SENTINEL).unwrap().is_empty());
    }

    #[test]
    fn test_weights_and_prefix_free() {
        let data = b"this is an example of a huffman tree";
        let tree = tree_for(data);
        assert_eq!(tree.root().weight(), data.len() as u64 + 1);

        let codes = tree.code_table();
        let distinct = FrequencyTable::analyze(data).unwrap().len();
        assert_eq!(codes.len(), distinct + 1);
        assert_eq!(tree.leaf_count(), distinct + 1);
        assert!(is_prefix_free(&codes));

        // the most frequent symbol never gets a longer code than the rarest
        let space = codes.get(b' ').unwrap().len();
        let x = codes.get(b'x').unwrap().len();
        assert!(space <= x);
    }

    #[test]
    fn test_serialized_header_layout() {
        let mut bits = Vec::new();
        tree_for(b"aaaa").serialize(&mut bits);
        let rendered: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        // internal, leaf 0x07, leaf 'a'
        assert_eq!(rendered, "0100000111101100001");
    }

    #[test]
    fn test_structural_roundtrip() {
        let tree = tree_for(b"she sells sea shells by the sea shore");
        let mut bits = Vec::new();
        tree.serialize(&mut bits);
        bits.extend([true, false, true]);

        let mut cursor = BitCursor::new(&bits);
        let rebuilt = HuffmanTree::deserialize(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(rebuilt.code_table(), tree.code_table());
    }

    #[test]
    fn test_truncated_header() {
        let mut bits = Vec::new();
        tree_for(b"abc").serialize(&mut bits);
        bits.truncate(bits.len() - 3);

        let mut cursor = BitCursor::new(&bits);
        assert!(matches!(
            HuffmanTree::deserialize(&mut cursor),
            Err(CodecError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn test_runaway_nesting_rejected() {
        let bits = vec![false; 4096];
        let mut cursor = BitCursor::new(&bits);
        assert!(matches!(
            HuffmanTree::deserialize(&mut cursor),
            Err(CodecError::InvalidTree)
        ));
    }

    #[test]
    fn test_rules_both_build_valid_trees() {
        let data = b"aabbccddeeffgghh";
        let table = FrequencyTable::analyze(data).unwrap();
        for rule in [SiftRule::Reference, SiftRule::SmallestChild] {
            let tree = HuffmanTree::build(&table, rule).unwrap();
            assert_eq!(tree.leaf_count(), 9);
            assert!(is_prefix_free(&tree.code_table()));
        }
    }
}
