use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use super::frequency::FrequencyTable;

/// A node of the prefix tree. Internal nodes own exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    /// Weights saturate at `u64::MAX`. Codes stay prefix-free either way.
    fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for a frequency table, or `None` if the table is empty.
    ///
    /// Ties between equal weights go to whichever node entered the queue
    /// first: leaves enter in ascending symbol order, merged nodes after all
    /// leaves in the order they are created. The first node pulled out of the
    /// queue becomes the left child.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut queue: BinaryHeap<Reverse<Queued>> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| {
                Reverse(Queued {
                    seq,
                    node: HuffmanNode::Leaf { symbol, weight },
                })
            })
            .collect();
        let mut next_seq = queue.len();

        while queue.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (queue.pop(), queue.pop()) else {
                unreachable!("queue holds at least two nodes");
            };
            trace!(
                left = left.node.weight(),
                right = right.node.weight(),
                "merging nodes"
            );
            queue.push(Reverse(Queued {
                seq: next_seq,
                node: HuffmanNode::merge(left.node, right.node),
            }));
            next_seq += 1;
        }

        let root = queue.pop()?.0.node;
        debug!(
            symbols = frequencies.len(),
            weight = root.weight(),
            "built huffman tree"
        );
        Some(Self { root })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight, equal to the number of symbols in the counted text.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }
}

/// Priority queue entry, ordered by `(weight, seq)`.
#[derive(Debug)]
struct Queued {
    seq: usize,
    node: HuffmanNode,
}

impl Queued {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: char, weight: u64) -> HuffmanNode {
        HuffmanNode::Leaf { symbol, weight }
    }

    #[test]
    fn empty_table_has_no_tree() {
        assert_eq!(HuffmanTree::build(&FrequencyTable::default()), None);
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("aaaa")).unwrap();
        assert_eq!(tree.root(), &leaf('a', 4));
    }

    /// a=2, b=3, c=2: (a, c) merge first, then (b, ac).
    #[test]
    fn merge_order() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("aabbbcc")).unwrap();
        let expected = HuffmanNode::Internal {
            weight: 7,
            left: Box::new(leaf('b', 3)),
            right: Box::new(HuffmanNode::Internal {
                weight: 4,
                left: Box::new(leaf('a', 2)),
                right: Box::new(leaf('c', 2)),
            }),
        };
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.weight(), 7);
    }

    #[test]
    fn ties_prefer_older_nodes() {
        // After (a, b) -> ab(2), the queue holds c(1), d(1) and ab(2); then
        // cd(2) ties with ab(2), and ab was created first.
        let tree = HuffmanTree::build(&FrequencyTable::from_text("abcd")).unwrap();
        let HuffmanNode::Internal { left, right, .. } = tree.root() else {
            panic!("expected an internal root");
        };
        let pair = |a, b| HuffmanNode::Internal {
            weight: 2,
            left: Box::new(leaf(a, 1)),
            right: Box::new(leaf(b, 1)),
        };
        assert_eq!(**left, pair('a', 'b'));
        assert_eq!(**right, pair('c', 'd'));
    }

    #[test]
    fn huge_weights_saturate() {
        let table = FrequencyTable::from_counts([('a', u64::MAX), ('b', u64::MAX), ('c', 1)]);
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.weight(), u64::MAX);
    }

    #[test]
    fn build_is_deterministic() {
        let table = FrequencyTable::from_text("the quick brown fox jumps over the lazy dog");
        assert_eq!(HuffmanTree::build(&table), HuffmanTree::build(&table));
    }
}
