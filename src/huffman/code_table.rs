use std::collections::{BTreeMap, HashMap};
use std::fmt;

use bitvec::prelude::*;
use tracing::debug;

use super::frequency::FrequencyTable;
use super::tree::{HuffmanNode, HuffmanTree};

/// The codeword of a single symbol. `0` is a step left, `1` a step right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `other` starts with every bit of `self`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.len() >= self.len() && other.0[..self.len()] == self.0[..]
    }

    pub(crate) fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    fn child(&self, bit: bool) -> Code {
        let mut code = self.clone();
        code.push(bit);
        code
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code and code to symbol mappings for one input.
///
/// Immutable once built. Keeps the frequencies it was derived from, which is
/// all that needs persisting to rebuild the identical table later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    frequencies: FrequencyTable,
    codes: BTreeMap<char, Code>,
    symbols: HashMap<Code, char>,
}

impl CodeTable {
    /// Build the tree for `frequencies` and assign a code to every leaf.
    ///
    /// An empty table gives an empty code table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut table = CodeTable {
            frequencies: frequencies.clone(),
            ..Default::default()
        };
        if let Some(tree) = HuffmanTree::build(frequencies) {
            table.assign(&tree);
        }
        debug!(
            symbols = table.len(),
            weighted_length = table.weighted_length(),
            "assigned huffman codes"
        );
        table
    }

    /// Depth-first walk with an explicit stack, so alphabet size doesn't
    /// bound recursion depth.
    fn assign(&mut self, tree: &HuffmanTree) {
        // A lone leaf never branches. It still needs a one-bit code.
        if let HuffmanNode::Leaf { symbol, .. } = tree.root() {
            self.insert(*symbol, Code::default().child(false));
            return;
        }

        let mut stack = vec![(tree.root(), Code::default())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => self.insert(*symbol, path),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), path.child(true)));
                    stack.push((left.as_ref(), path.child(false)));
                }
            }
        }
    }

    fn insert(&mut self, symbol: char, code: Code) {
        self.symbols.insert(code.clone(), symbol);
        self.codes.insert(symbol, code);
    }

    pub fn code(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn symbol(&self, code: &Code) -> Option<char> {
        self.symbols.get(code).copied()
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Σ code length × frequency: the exact bit length of the encoded text.
    ///
    /// Saturates at `u64::MAX`.
    pub fn weighted_length(&self) -> u64 {
        self.iter().fold(0u64, |total, (symbol, code)| {
            let bits = (code.len() as u64).saturating_mul(self.frequencies.get(symbol));
            total.saturating_add(bits)
        })
    }
}
